//! Error types for the RDIP client

use serde_json::Value;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Message used when a response carries nothing readable
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Errors that can occur when talking to the analysis service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("Connection error: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Human-readable message extracted from the body
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The base URL cannot be extended into an endpoint URL
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Create an API error from a status code and the raw response body
    pub fn from_body(status: u16, body: &str) -> Self {
        Self::ApiError {
            status,
            message: extract_message(body),
        }
    }

    /// The message to show a user, without the status prefix
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if the service was never reached
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::RequestFailed(_))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

/// Pull a readable message out of an error body.
///
/// Understands `{"detail": "..."}`, the validation shape
/// `{"detail": [{"msg": "..."}, ...]}`, and `error`/`message` fields.
/// Falls back to the raw text, then to [`UNKNOWN_ERROR`].
pub fn extract_message(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return UNKNOWN_ERROR.to_string();
    }

    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    match json.get("detail") {
        Some(Value::String(detail)) => return detail.clone(),
        Some(Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !msgs.is_empty() {
                return msgs.join("; ");
            }
        }
        _ => {}
    }

    ["error", "message"]
        .iter()
        .find_map(|key| json.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}
