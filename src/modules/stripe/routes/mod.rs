mod account_status;
mod checkout_session;
mod client_ip;
mod create_account;
mod create_custom_account;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(create_account::get_router())
        .merge(create_custom_account::get_router())
        .merge(account_status::get_router())
        .merge(checkout_session::get_router())
}
