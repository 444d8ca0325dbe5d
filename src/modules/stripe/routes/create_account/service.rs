use super::types::{request, response};
use crate::{
    modules::stripe::{
        model::{
            Address, BusinessProfile, Capabilities, CapabilityRequest, CreateAccountRequest,
            DateOfBirth, ExternalBankAccount, Individual, PaymentSettings, PayoutSchedule,
            PayoutSettings, Settings, TosAcceptance, ACCOUNT_COUNTRY, ACCOUNT_CURRENCY,
            DEFAULT_BUSINESS_TYPE, DEFAULT_WEBSITE, STATEMENT_DESCRIPTOR,
        },
        utils::{non_empty, strip_whitespace, ParsedInt},
    },
    types::Context,
};
use std::sync::Arc;

#[derive(Debug)]
pub enum BuildError {
    MissingBankAccount,
}

fn display_name_part(part: &Option<String>) -> &str {
    part.as_deref().unwrap_or("undefined")
}

/// Maps a raw onboarding form onto Stripe's custom account shape.
///
/// `accepted_at` is the terms-of-service acceptance time in seconds.
pub fn build_account_request(
    body: request::Body,
    client_ip: Option<String>,
    accepted_at: i64,
) -> Result<CreateAccountRequest, BuildError> {
    let account_number = body
        .iban
        .as_deref()
        .map(strip_whitespace)
        .ok_or(BuildError::MissingBankAccount)?;

    let name = format!(
        "{} {}",
        display_name_part(&body.first_name),
        display_name_part(&body.last_name)
    );

    Ok(CreateAccountRequest {
        r#type: String::from("custom"),
        email: body.email,
        country: ACCOUNT_COUNTRY.to_string(),
        capabilities: Capabilities {
            card_payments: CapabilityRequest { requested: true },
            transfers: CapabilityRequest { requested: true },
        },
        business_type: non_empty(body.business_type)
            .unwrap_or_else(|| DEFAULT_BUSINESS_TYPE.to_string()),
        business_profile: BusinessProfile {
            name,
            url: non_empty(body.website).unwrap_or_else(|| DEFAULT_WEBSITE.to_string()),
        },
        individual: Individual {
            first_name: body.first_name,
            last_name: body.last_name,
            phone: body.phone,
            dob: DateOfBirth {
                day: ParsedInt::parse(body.dob_day.as_deref()),
                month: ParsedInt::parse(body.dob_month.as_deref()),
                year: ParsedInt::parse(body.dob_year.as_deref()),
            },
            address: Address {
                line1: body.address_line1,
                city: body.address_city,
                postal_code: body.address_postal_code,
                country: ACCOUNT_COUNTRY.to_string(),
            },
        },
        external_account: ExternalBankAccount {
            object: String::from("bank_account"),
            country: ACCOUNT_COUNTRY.to_string(),
            currency: ACCOUNT_CURRENCY.to_string(),
            account_number,
        },
        settings: Settings {
            payouts: PayoutSettings {
                schedule: PayoutSchedule {
                    interval: String::from("manual"),
                },
            },
            payments: PaymentSettings {
                statement_descriptor: STATEMENT_DESCRIPTOR.to_string(),
            },
        },
        tos_acceptance: TosAcceptance {
            date: accepted_at,
            ip: client_ip,
            service_agreement: String::from("full"),
        },
    })
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let accepted_at = chrono::Utc::now().timestamp();

    let account_request = build_account_request(payload.body, payload.client_ip.0, accepted_at)
        .map_err(|err| match err {
            BuildError::MissingBankAccount => {
                tracing::error!("Error creating Stripe account: missing iban");
                response::Error::FailedToCreateAccount(Some(String::from(
                    "Missing bank account number (iban)",
                )))
            }
        })?;

    let account = ctx
        .payment
        .provider
        .create_account(&account_request)
        .await
        .map_err(|err| {
            tracing::error!("Error creating Stripe account: {}", err);
            response::Error::FailedToCreateAccount(err.message())
        })?;

    tracing::info!("Created Stripe account {}", account.id);

    Ok(response::Success::AccountCreated(account.id))
}
