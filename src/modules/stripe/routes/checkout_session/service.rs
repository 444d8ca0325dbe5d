use super::types::{request, response};
use crate::{
    modules::stripe::{
        model::{
            CreateCheckoutSessionRequest, LineItem, PaymentIntentData, PriceData, ProductData,
            TransferData, ACCOUNT_CURRENCY,
        },
        utils::non_empty,
    },
    types::Context,
};
use std::sync::Arc;

pub const DEFAULT_PRODUCT_NAME: &str = "Produit Shay";
const PLATFORM_FEE_PERCENT: u64 = 8;
const PLATFORM_FEE_FIXED: u64 = 70;

/// Platform cut of a checkout: 8% of the amount, rounded down, plus 0.70.
pub fn application_fee(amount: u64) -> u64 {
    amount.saturating_mul(PLATFORM_FEE_PERCENT) / 100 + PLATFORM_FEE_FIXED
}

pub struct CheckoutRedirects {
    pub success_url: String,
    pub cancel_url: String,
}

pub fn build_checkout_session_request(
    body: request::Body,
    redirects: CheckoutRedirects,
) -> Result<CreateCheckoutSessionRequest, response::Error> {
    let amount = body
        .amount
        .filter(|amount| amount.is_finite())
        .map(f64::trunc)
        .filter(|amount| *amount >= 1.0)
        .map(|amount| amount as u64)
        .ok_or(response::Error::MissingAmountOrAccount)?;
    let destination =
        non_empty(body.stripe_account_id).ok_or(response::Error::MissingAmountOrAccount)?;

    Ok(CreateCheckoutSessionRequest {
        payment_method_types: vec![String::from("card")],
        line_items: vec![LineItem {
            price_data: PriceData {
                currency: non_empty(body.currency)
                    .unwrap_or_else(|| ACCOUNT_CURRENCY.to_string()),
                product_data: ProductData {
                    name: non_empty(body.product_name)
                        .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
                },
                unit_amount: amount,
            },
            quantity: 1,
        }],
        mode: String::from("payment"),
        success_url: redirects.success_url,
        cancel_url: redirects.cancel_url,
        payment_intent_data: PaymentIntentData {
            application_fee_amount: application_fee(amount),
            transfer_data: TransferData { destination },
        },
    })
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let session_request = build_checkout_session_request(
        payload.body,
        CheckoutRedirects {
            success_url: ctx.payment.checkout_success_url.clone(),
            cancel_url: ctx.payment.checkout_cancel_url.clone(),
        },
    )?;

    let session = ctx
        .payment
        .provider
        .create_checkout_session(&session_request)
        .await
        .map_err(|err| {
            tracing::error!("Error creating checkout session: {}", err);
            response::Error::FailedToCreateSession(err.message())
        })?;

    match session.url {
        Some(url) => Ok(response::Success::SessionCreated(url)),
        None => {
            tracing::error!("Checkout session {} has no hosted url", session.id);
            Err(response::Error::FailedToCreateSession(None))
        }
    }
}
