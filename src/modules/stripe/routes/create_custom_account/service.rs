use super::types::{request, response};
use crate::{
    modules::stripe::model::{
        Capabilities, CapabilityRequest, CreateCustomAccountRequest, TosAcceptance,
        ACCOUNT_COUNTRY, DEFAULT_BUSINESS_TYPE,
    },
    types::Context,
};
use std::sync::Arc;

/// Bare FR individual account; identity and bank details are attached later.
pub fn build_custom_account_request(
    client_ip: Option<String>,
    accepted_at: i64,
) -> CreateCustomAccountRequest {
    CreateCustomAccountRequest {
        r#type: String::from("custom"),
        country: ACCOUNT_COUNTRY.to_string(),
        capabilities: Capabilities {
            card_payments: CapabilityRequest { requested: true },
            transfers: CapabilityRequest { requested: true },
        },
        business_type: DEFAULT_BUSINESS_TYPE.to_string(),
        tos_acceptance: TosAcceptance {
            date: accepted_at,
            ip: client_ip,
            service_agreement: String::from("full"),
        },
    }
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let account_request =
        build_custom_account_request(payload.client_ip.0, chrono::Utc::now().timestamp());

    let account = ctx
        .payment
        .provider
        .create_custom_account(&account_request)
        .await
        .map_err(|err| {
            tracing::error!("Error creating custom Stripe account: {}", err);
            response::Error::FailedToCreateAccount(err.message())
        })?;

    tracing::info!("Created custom Stripe account {}", account.id);

    Ok(response::Success::AccountCreated(account.id))
}
