//! Client error types

use http::StatusCode;
use shared::{DEFAULT_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failed (connection refused, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (401); the stored token has been cleared
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Non-2xx response carrying the backend's message
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Token store I/O failed
    #[error("Token store error: {0}")]
    TokenStore(#[from] std::io::Error),
}

impl ClientError {
    /// Message to show the user for this error
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Unauthorized(message) => message.clone(),
            Self::Http(_) => NETWORK_ERROR_MESSAGE.to_string(),
            _ => DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
