use crate::modules::stripe::client::{PaymentProvider, StripeClient};
use async_trait::async_trait;
use axum::http::HeaderValue;
use core::time::Duration;
use std::env;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
    pub trust_proxy: bool,
}

#[derive(Clone)]
pub struct PaymentContext {
    pub provider: Arc<dyn PaymentProvider>,
    pub checkout_success_url: String,
    pub checkout_cancel_url: String,
}

#[derive(Clone)]
pub struct CorsContext {
    pub allowed_origin: Option<HeaderValue>,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub payment: PaymentContext,
    pub cors: CorsContext,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
    pub trust_proxy: bool,
}

#[derive(Clone)]
pub struct PaymentConfig {
    pub api_endpoint: String,
    pub api_version: String,
    pub secret_key: String,
    pub timeout: Option<Duration>,
    pub checkout_success_url: String,
    pub checkout_cancel_url: String,
}

#[derive(Clone)]
pub struct CorsConfig {
    pub allowed_origin: Option<String>,
}

#[derive(Clone)]
pub struct Config {
    pub app: AppConfig,
    pub payment: PaymentConfig,
    pub cors: CorsConfig,
}

pub const DEFAULT_STRIPE_API_ENDPOINT: &str = "https://api.stripe.com/v1";
pub const DEFAULT_STRIPE_API_VERSION: &str = "2023-10-16";

impl Default for Config {
    fn default() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u32>()
            .expect("Invalid PORT number");
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let trust_proxy = env::var("TRUST_PROXY")
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let payment_secret_key = env::var("STRIPE_SECRET_KEY").unwrap_or_default();
        let payment_api_endpoint = env::var("STRIPE_API_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_STRIPE_API_ENDPOINT.to_string());
        let payment_api_version = env::var("STRIPE_API_VERSION")
            .unwrap_or_else(|_| DEFAULT_STRIPE_API_VERSION.to_string());
        let payment_timeout = env::var("STRIPE_TIMEOUT_SECS").ok().map(|secs| {
            Duration::from_secs(
                secs.parse::<u64>()
                    .expect("Invalid STRIPE_TIMEOUT_SECS value"),
            )
        });
        let checkout_success_url = env::var("CHECKOUT_SUCCESS_URL")
            .unwrap_or_else(|_| "https://shay-b.netlify.app/success".to_string());
        let checkout_cancel_url = env::var("CHECKOUT_CANCEL_URL")
            .unwrap_or_else(|_| "https://shay-b.netlify.app/cancel".to_string());
        let cors_allowed_origin = env::var("CORS_ALLOWED_ORIGIN").ok();

        return Self {
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
                trust_proxy,
            },
            payment: PaymentConfig {
                api_endpoint: payment_api_endpoint,
                api_version: payment_api_version,
                secret_key: payment_secret_key,
                timeout: payment_timeout,
                checkout_success_url,
                checkout_cancel_url,
            },
            cors: CorsConfig {
                allowed_origin: cors_allowed_origin,
            },
        };
    }
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Context;
}

fn report_secret_key(secret_key: &str) {
    if !secret_key.starts_with("sk_") {
        tracing::warn!("Invalid or missing Stripe API key, provider calls will fail");
        return;
    }

    let visible = secret_key.chars().take(4).collect::<String>();
    tracing::info!("Stripe API key detected: {}************", visible);
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Context {
        report_secret_key(&self.payment.secret_key);

        let provider = StripeClient::new(
            self.payment.api_endpoint,
            self.payment.api_version,
            self.payment.secret_key,
            self.payment.timeout,
        );

        let allowed_origin = self
            .cors
            .allowed_origin
            .and_then(|origin| match HeaderValue::from_str(&origin) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!("Ignoring invalid CORS_ALLOWED_ORIGIN {}: {}", origin, err);
                    None
                }
            });

        Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
                trust_proxy: self.app.trust_proxy,
            },
            payment: PaymentContext {
                provider: Arc::new(provider),
                checkout_success_url: self.payment.checkout_success_url,
                checkout_cancel_url: self.payment.checkout_cancel_url,
            },
            cors: CorsContext { allowed_origin },
        }
    }
}
