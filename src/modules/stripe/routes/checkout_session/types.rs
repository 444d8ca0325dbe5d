pub mod request {
    use crate::modules::stripe::utils::deserialize_lenient_string;
    use serde::Deserialize;
    use serde_aux::field_attributes::deserialize_option_number_from_string;

    #[derive(Deserialize, Default)]
    pub struct Body {
        /// Amount to charge, in cents. Fractions are dropped when the session is built.
        #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
        pub amount: Option<f64>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub currency: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub product_name: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub stripe_account_id: Option<String>,
    }

    pub struct Payload {
        pub body: Body,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub const DEFAULT_ERROR_MESSAGE: &str = "Erreur lors de la création de la session de paiement";

    pub enum Success {
        SessionCreated(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::SessionCreated(url) => {
                    (StatusCode::OK, Json(json!({ "url": url }))).into_response()
                }
            }
        }
    }

    #[derive(Debug, PartialEq)]
    pub enum Error {
        MissingAmountOrAccount,
        FailedToCreateSession(Option<String>),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            let message = match self {
                Self::MissingAmountOrAccount => {
                    String::from("amount and stripe_account_id are required")
                }
                Self::FailedToCreateSession(message) => {
                    message.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
                }
            };

            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": { "message": message } })),
            )
                .into_response()
        }
    }

    pub type Response = Result<Success, Error>;
}
