use super::{
    service::service,
    types::{request, response},
};
use crate::types::Context;
use axum::extract::{rejection::JsonRejection, Json, State};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    client_ip: request::ClientIp,
    body: Result<Json<request::Body>, JsonRejection>,
) -> response::Response {
    let Json(body) = body.map_err(|rejection| {
        tracing::error!("Error creating Stripe account: {}", rejection.body_text());
        response::Error::FailedToCreateAccount(Some(rejection.body_text()))
    })?;

    service(ctx, request::Payload { body, client_ip }).await
}
