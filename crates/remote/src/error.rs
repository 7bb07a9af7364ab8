//! Error types for the remote crate.

use quotebook_core::errors::FetchError;
use thiserror::Error;

/// Result type alias for remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Errors that can occur while talking to the remote endpoint.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success response from the endpoint
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid client configuration (bad URL, zero limit, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RemoteError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

impl From<RemoteError> for FetchError {
    fn from(error: RemoteError) -> Self {
        match error {
            RemoteError::Http(e) if e.is_timeout() => FetchError::Timeout(e.to_string()),
            RemoteError::Http(e) if e.is_decode() => FetchError::Decode(e.to_string()),
            RemoteError::Http(e) => FetchError::Network(e.to_string()),
            RemoteError::Json(e) => FetchError::Decode(e.to_string()),
            RemoteError::Api { status, message } => FetchError::Status { status, message },
            RemoteError::InvalidConfig(message) => FetchError::Network(message),
        }
    }
}
