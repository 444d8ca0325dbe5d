pub mod request {
    use crate::modules::stripe::utils::deserialize_lenient_string;
    use serde::Deserialize;

    #[derive(Deserialize, Default)]
    pub struct Body {
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        pub account_id: Option<String>,
    }

    pub struct Payload {
        pub body: Body,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde::Serialize;
    use serde_json::json;

    pub const DEFAULT_ERROR_MESSAGE: &str = "Erreur lors de la vérification du compte Stripe";

    #[derive(Serialize, Debug, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountStatus {
        pub is_verified: bool,
        pub is_restricted: bool,
        pub requires_info: bool,
        pub pending_requirements: Vec<String>,
        pub current_deadline: Option<i64>,
    }

    pub enum Success {
        Status(AccountStatus),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Status(status) => (StatusCode::OK, Json(status)).into_response(),
            }
        }
    }

    #[derive(Debug, PartialEq)]
    pub enum Error {
        MissingAccountId,
        FailedToRetrieveAccount(Option<String>),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            let message = match self {
                Self::MissingAccountId => String::from("Missing account_id parameter"),
                Self::FailedToRetrieveAccount(message) => {
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
