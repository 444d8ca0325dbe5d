pub mod request {
    pub use crate::modules::stripe::routes::client_ip::ClientIp;

    pub struct Payload {
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
