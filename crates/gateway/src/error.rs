use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::json;

/// Every way a session request can fail.
///
/// Each variant maps to the status that reflects where the failure came
/// from: the caller (4xx), this server's configuration (500), or upstream
/// (502, or upstream's own status).  None of them is retried.
#[derive(thiserror::Error, Debug)]
pub enum BrokerError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Missing {env} environment variable")]
    MissingApiKey { env: String },

    #[error("Missing workflow ID")]
    MissingWorkflow,

    /// The upstream call never completed.
    #[error("Failed to reach ChatKit API: {0}")]
    Unreachable(String),

    /// Upstream answered with a non-success status.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// Upstream answered 2xx without a usable `client_secret`.
    #[error("Missing client secret in response")]
    MissingClientSecret,
}

impl BrokerError {
    pub fn status(&self) -> StatusCode {
        match self {
            BrokerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            BrokerError::MissingApiKey { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            BrokerError::MissingWorkflow => StatusCode::BAD_REQUEST,
            BrokerError::Unreachable(_) => StatusCode::BAD_GATEWAY,
            BrokerError::Upstream { status, .. } => *status,
            BrokerError::MissingClientSecret => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for BrokerError {
    fn into_response(self) -> axum::response::Response {
        let body = json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
