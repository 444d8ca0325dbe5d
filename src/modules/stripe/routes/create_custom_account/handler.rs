use super::{
    service::service,
    types::{request, response},
};
use crate::types::Context;
use axum::extract::State;
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    client_ip: request::ClientIp,
) -> response::Response {
    service(ctx, request::Payload { client_ip }).await
}
