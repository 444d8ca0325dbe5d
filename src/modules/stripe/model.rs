use super::utils::ParsedInt;
use serde::{Deserialize, Serialize};

pub const ACCOUNT_COUNTRY: &str = "FR";
pub const ACCOUNT_CURRENCY: &str = "eur";
pub const STATEMENT_DESCRIPTOR: &str = "SHAY BEAUTY";
pub const DEFAULT_BUSINESS_TYPE: &str = "individual";
pub const DEFAULT_WEBSITE: &str = "https://example.com";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CapabilityRequest {
    pub requested: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Capabilities {
    pub card_payments: CapabilityRequest,
    pub transfers: CapabilityRequest,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BusinessProfile {
    pub name: String,
    pub url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DateOfBirth {
    pub day: ParsedInt,
    pub month: ParsedInt,
    pub year: ParsedInt,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub country: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Individual {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub dob: DateOfBirth,
    pub address: Address,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ExternalBankAccount {
    pub object: String,
    pub country: String,
    pub currency: String,
    pub account_number: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PayoutSchedule {
    pub interval: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PayoutSettings {
    pub schedule: PayoutSchedule,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PaymentSettings {
    pub statement_descriptor: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub payouts: PayoutSettings,
    pub payments: PaymentSettings,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TosAcceptance {
    /// Seconds since the Unix epoch.
    pub date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    pub service_agreement: String,
}

/// Body of `POST /v1/accounts` for a custom connected account.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateAccountRequest {
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub country: String,
    pub capabilities: Capabilities,
    pub business_type: String,
    pub business_profile: BusinessProfile,
    pub individual: Individual,
    pub external_account: ExternalBankAccount,
    pub settings: Settings,
    pub tos_acceptance: TosAcceptance,
}

/// Body of `POST /v1/accounts` for a bare custom account whose details are
/// collected afterwards.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateCustomAccountRequest {
    pub r#type: String,
    pub country: String,
    pub capabilities: Capabilities,
    pub business_type: String,
    pub tos_acceptance: TosAcceptance,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AccountRequirements {
    #[serde(default)]
    pub currently_due: Vec<String>,
    pub disabled_reason: Option<String>,
    pub current_deadline: Option<i64>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub charges_enabled: bool,
    #[serde(default)]
    pub payouts_enabled: bool,
    #[serde(default)]
    pub requirements: AccountRequirements,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProductData {
    pub name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PriceData {
    pub currency: String,
    pub product_data: ProductData,
    pub unit_amount: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LineItem {
    pub price_data: PriceData,
    pub quantity: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TransferData {
    pub destination: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PaymentIntentData {
    pub application_fee_amount: u64,
    pub transfer_data: TransferData,
}

/// Body of `POST /v1/checkout/sessions`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateCheckoutSessionRequest {
    pub payment_method_types: Vec<String>,
    pub line_items: Vec<LineItem>,
    pub mode: String,
    pub success_url: String,
    pub cancel_url: String,
    pub payment_intent_data: PaymentIntentData,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct StripeErrorBody {
    pub message: Option<String>,
}

/// Error envelope returned by Stripe on non-2xx responses.
#[derive(Deserialize, Debug, Default)]
pub struct StripeErrorResponse {
    #[serde(default)]
    pub error: StripeErrorBody,
}
