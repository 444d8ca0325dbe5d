pub mod request {
    pub use crate::modules::stripe::routes::client_ip::ClientIp;
    use crate::modules::stripe::utils::deserialize_lenient_string;
    use serde::Deserialize;

    /// Onboarding form exactly as submitted. Nothing here is validated.
    #[derive(Deserialize, Default, Debug, Clone)]
    pub struct Body {
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub email: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub business_type: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub first_name: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub last_name: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub website: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub phone: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub dob_day: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub dob_month: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub dob_year: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub address_line1: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub address_city: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub address_postal_code: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub iban: Option<String>,
    }

    pub struct Payload {
        pub body: Body,
        pub client_ip: ClientIp,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub const DEFAULT_ERROR_MESSAGE: &str = "Erreur lors de la création du compte Stripe";

    pub enum Success {
        AccountCreated(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::AccountCreated(id) => (StatusCode::OK, Json(json!({ "id": id }))).into_response(),
            }
        }
    }

    #[derive(Debug, PartialEq)]
    pub enum Error {
        FailedToCreateAccount(Option<String>),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToCreateAccount(message) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": {
                            "message": message.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
                        }
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
