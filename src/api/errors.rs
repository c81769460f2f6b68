use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failures surfaced by the debt-tracker API gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Token missing, expired or lacking the required role.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Entity not found")]
    NotFound,

    /// The API refused the request, usually a business rule.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Builds the error for a non-success response and its raw body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            status if status.is_client_error() => ApiError::Rejected {
                status: status.as_u16(),
                message: extract_message(status, body),
            },
            status => ApiError::Server {
                status: status.as_u16(),
                message: extract_message(status, body),
            },
        }
    }

    /// Message suitable for showing to the operator.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } | ApiError::Server { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

/// Best-effort server message: `{"error"}`, then `{"message"}`, then the raw body.
pub fn extract_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
