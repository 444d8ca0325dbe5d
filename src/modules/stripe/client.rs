use super::{
    model::{
        Account, CheckoutSession, CreateAccountRequest, CreateCheckoutSessionRequest,
        CreateCustomAccountRequest, StripeErrorResponse,
    },
    utils,
};
use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue, Method};
use core::time::Duration;
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    RequestNotSent(String),
    RejectedByProvider {
        status: u16,
        message: Option<String>,
    },
    FailedToDecodeResponse(String),
}

impl Error {
    /// Human readable message to surface to the caller, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::RequestNotSent(message) => Some(message.clone()),
            Self::RejectedByProvider { message, .. } => message.clone(),
            Self::FailedToDecodeResponse(message) => Some(message.clone()),
        }
        .filter(|message| !message.is_empty())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestNotSent(err) => write!(f, "request to Stripe not sent: {}", err),
            Self::RejectedByProvider { status, message } => write!(
                f,
                "Stripe rejected the request with status {}: {}",
                status,
                message.as_deref().unwrap_or("<no message>")
            ),
            Self::FailedToDecodeResponse(err) => {
                write!(f, "failed to decode Stripe response: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Operations the backend needs from the payment provider.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_account(&self, request: &CreateAccountRequest) -> Result<Account>;

    async fn create_custom_account(
        &self,
        request: &CreateCustomAccountRequest,
    ) -> Result<Account>;

    async fn retrieve_account(&self, account_id: &str) -> Result<Account>;

    async fn create_checkout_session(
        &self,
        request: &CreateCheckoutSessionRequest,
    ) -> Result<CheckoutSession>;
}

pub struct SendStripeRequestPayload<'a, B: Serialize> {
    /// Path segments below the API endpoint, each one percent-encoded on its own.
    pub route: &'a [&'a str],
    pub method: Method,
    pub body: Option<&'a B>,
}

pub struct StripeClient {
    http: reqwest::Client,
    api_endpoint: String,
    api_version: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(
        api_endpoint: String,
        api_version: String,
        secret_key: String,
        timeout: Option<Duration>,
    ) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().unwrap_or_else(|err| {
            tracing::warn!("Failed to build configured HTTP client, using defaults: {}", err);
            reqwest::Client::new()
        });

        Self {
            http,
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            api_version,
            secret_key,
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {}", self.secret_key))
                .map_err(|err| Error::RequestNotSent(format!("Invalid Stripe API key: {}", err)))?,
        );
        headers.insert(
            "Stripe-Version",
            HeaderValue::from_str(&self.api_version).map_err(|err| {
                Error::RequestNotSent(format!("Invalid Stripe API version: {}", err))
            })?,
        );

        Ok(headers)
    }

    fn url(&self, route: &[&str]) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.api_endpoint).map_err(|err| {
            Error::RequestNotSent(format!("Invalid Stripe API endpoint: {}", err))
        })?;

        url.path_segments_mut()
            .map_err(|_| Error::RequestNotSent(String::from("Invalid Stripe API endpoint")))?
            .pop_if_empty()
            .extend(route);

        Ok(url)
    }

    pub async fn send_stripe_request<'a, B: Serialize, R: DeserializeOwned>(
        &self,
        payload: SendStripeRequestPayload<'a, B>,
    ) -> Result<R> {
        let url = self.url(payload.route)?;
        let mut req = match payload.method {
            Method::GET => self.http.get(url),
            _ => self.http.post(url),
        };

        req = req.headers(self.headers()?);

        if let Some(body) = payload.body {
            let value = serde_json::to_value(body).map_err(|err| {
                tracing::error!("Failed to encode Stripe request body: {}", err);
                Error::RequestNotSent(err.to_string())
            })?;
            req = req.form(&utils::to_form_pairs(&value));
        }

        let res = req.send().await.map_err(|err| {
            tracing::error!("Failed to send Stripe request: {}", err);
            Error::RequestNotSent(err.to_string())
        })?;

        let status = res.status();

        let data = res.text().await.map_err(|err| {
            tracing::error!("Failed to read Stripe response body: {}", err);
            Error::FailedToDecodeResponse(err.to_string())
        })?;

        tracing::trace!("Response received from Stripe server: {}", data);

        if !status.is_success() {
            tracing::error!("Got unexpected http response status from Stripe: {}", status);
            let message = serde_json::de::from_str::<StripeErrorResponse>(&data)
                .ok()
                .and_then(|res| res.error.message);

            return Err(Error::RejectedByProvider {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::de::from_str::<R>(&data).map_err(|err| {
            tracing::error!("Failed to decode Stripe response: {}", err);
            Error::FailedToDecodeResponse(err.to_string())
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_account(&self, request: &CreateAccountRequest) -> Result<Account> {
        self.send_stripe_request(SendStripeRequestPayload {
            route: &["accounts"],
            method: Method::POST,
            body: Some(request),
        })
        .await
    }

    async fn create_custom_account(
        &self,
        request: &CreateCustomAccountRequest,
    ) -> Result<Account> {
        self.send_stripe_request(SendStripeRequestPayload {
            route: &["accounts"],
            method: Method::POST,
            body: Some(request),
        })
        .await
    }

    async fn retrieve_account(&self, account_id: &str) -> Result<Account> {
        // Dot segments are dropped by the URL builder and would address the
        // account list instead of one account.
        if account_id.is_empty() || account_id == "." || account_id == ".." {
            return Err(Error::RequestNotSent(format!(
                "Invalid account id: {:?}",
                account_id
            )));
        }

        self.send_stripe_request::<(), Account>(SendStripeRequestPayload {
            route: &["accounts", account_id],
            method: Method::GET,
            body: None,
        })
        .await
    }

    async fn create_checkout_session(
        &self,
        request: &CreateCheckoutSessionRequest,
    ) -> Result<CheckoutSession> {
        self.send_stripe_request(SendStripeRequestPayload {
            route: &["checkout", "sessions"],
            method: Method::POST,
            body: Some(request),
        })
        .await
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::stripe::model::{
        LineItem, PaymentIntentData, PriceData, ProductData, TransferData,
    };
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    struct RecordedRequest {
        head: String,
        body: String,
    }

    /// Accepts a single connection, records the request and answers with
    /// the given status line and JSON body.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<RecordedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            let head_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
                if n == 0 {
                    break buf.len();
                }
            };

            let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
            let content_length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);

            while buf.len() < head_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            RecordedRequest {
                head,
                body: String::from_utf8_lossy(&buf[head_end..]).to_string(),
            }
        });

        (format!("http://{}/v1", addr), handle)
    }

    fn client(endpoint: String) -> StripeClient {
        let mut client = StripeClient::new(
            endpoint,
            String::from("2023-10-16"),
            String::from("sk_test_123"),
            None,
        );
        client.http = reqwest::Client::builder().no_proxy().build().unwrap();
        client
    }

    fn checkout_request() -> CreateCheckoutSessionRequest {
        CreateCheckoutSessionRequest {
            payment_method_types: vec![String::from("card")],
            line_items: vec![LineItem {
                price_data: PriceData {
                    currency: String::from("eur"),
                    product_data: ProductData {
                        name: String::from("Produit Shay"),
                    },
                    unit_amount: 4500,
                },
                quantity: 1,
            }],
            mode: String::from("payment"),
            success_url: String::from("https://shay-b.netlify.app/success"),
            cancel_url: String::from("https://shay-b.netlify.app/cancel"),
            payment_intent_data: PaymentIntentData {
                application_fee_amount: 430,
                transfer_data: TransferData {
                    destination: String::from("acct_seller"),
                },
            },
        }
    }

    #[test]
    fn rejection_without_message_has_no_message() {
        let err = Error::RejectedByProvider {
            status: 401,
            message: None,
        };
        assert_eq!(err.message(), None);
    }

    #[test]
    fn empty_message_counts_as_no_message() {
        let err = Error::RejectedByProvider {
            status: 400,
            message: Some(String::new()),
        };
        assert_eq!(err.message(), None);
        assert_eq!(Error::RequestNotSent(String::new()).message(), None);
    }

    #[test]
    fn rejection_surfaces_provider_message() {
        let err = Error::RejectedByProvider {
            status: 400,
            message: Some(String::from("Invalid IBAN provided")),
        };
        assert_eq!(err.message().as_deref(), Some("Invalid IBAN provided"));
    }

    #[test]
    fn builds_urls_below_the_versioned_endpoint() {
        let client = client(String::from("https://api.stripe.com/v1/"));
        assert_eq!(
            client.url(&["checkout", "sessions"]).unwrap().as_str(),
            "https://api.stripe.com/v1/checkout/sessions"
        );
        assert!(client.headers().is_ok());
    }

    #[tokio::test]
    async fn account_id_stays_inside_one_path_segment() {
        let (endpoint, server) = serve_once(
            "404 Not Found",
            r#"{"error":{"message":"No such account","type":"invalid_request_error"}}"#,
        )
        .await;

        let res = client(endpoint)
            .retrieve_account("acct_x/../../charges/ch_123")
            .await;
        let request = server.await.unwrap();

        assert!(request
            .head
            .starts_with("GET /v1/accounts/acct_x%2F..%2F..%2Fcharges%2Fch_123 HTTP/1.1"));
        assert_eq!(
            res,
            Err(Error::RejectedByProvider {
                status: 404,
                message: Some(String::from("No such account")),
            })
        );
    }

    #[tokio::test]
    async fn dot_segment_account_ids_are_refused() {
        let client = client(String::from("http://127.0.0.1:9/v1"));

        for account_id in ["", ".", ".."] {
            assert!(matches!(
                client.retrieve_account(account_id).await,
                Err(Error::RequestNotSent(_))
            ));
        }
    }

    #[tokio::test]
    async fn sends_bracketed_form_with_credentials() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"id":"cs_test_1","url":"https://checkout.stripe.com/c/pay/cs_test_1"}"#,
        )
        .await;

        let res = client(endpoint)
            .create_checkout_session(&checkout_request())
            .await;
        let request = server.await.unwrap();
        let head = request.head.to_lowercase();

        assert!(request.head.starts_with("POST /v1/checkout/sessions HTTP/1.1"));
        assert!(head.contains("authorization: bearer sk_test_123"));
        assert!(head.contains("stripe-version: 2023-10-16"));
        assert!(head.contains("content-type: application/x-www-form-urlencoded"));
        assert!(request
            .body
            .contains("line_items%5B0%5D%5Bprice_data%5D%5Bunit_amount%5D=4500"));
        assert!(request
            .body
            .contains("payment_intent_data%5Btransfer_data%5D%5Bdestination%5D=acct_seller"));
        assert!(request.body.contains("mode=payment"));
        assert_eq!(
            res,
            Ok(CheckoutSession {
                id: String::from("cs_test_1"),
                url: Some(String::from("https://checkout.stripe.com/c/pay/cs_test_1")),
            })
        );
    }

    #[tokio::test]
    async fn decodes_error_envelope_on_rejection() {
        let (endpoint, server) = serve_once(
            "400 Bad Request",
            r#"{"error":{"message":"Invalid IBAN provided","type":"invalid_request_error"}}"#,
        )
        .await;

        let res = client(endpoint)
            .create_checkout_session(&checkout_request())
            .await;
        server.await.unwrap();

        assert_eq!(
            res,
            Err(Error::RejectedByProvider {
                status: 400,
                message: Some(String::from("Invalid IBAN provided")),
            })
        );
    }

    #[tokio::test]
    async fn rejection_without_envelope_has_no_message() {
        let (endpoint, server) = serve_once("500 Internal Server Error", "<html></html>").await;

        let res = client(endpoint)
            .create_checkout_session(&checkout_request())
            .await;
        server.await.unwrap();

        assert_eq!(
            res,
            Err(Error::RejectedByProvider {
                status: 500,
                message: None,
            })
        );
    }

    #[tokio::test]
    async fn undecodable_success_body_is_reported() {
        let (endpoint, server) = serve_once("200 OK", r#"{"object":"list"}"#).await;

        let res = client(endpoint)
            .create_checkout_session(&checkout_request())
            .await;
        server.await.unwrap();

        assert!(matches!(res, Err(Error::FailedToDecodeResponse(_))));
    }
}
