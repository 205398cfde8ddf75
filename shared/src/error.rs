//! Error types for the shared crate
//!
//! Model-level validation errors and the error body the backend returns on
//! non-2xx responses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when the backend error body carries no `error` field
pub const DEFAULT_ERROR_MESSAGE: &str = "Ocurrió un error en la operación.";

/// Message shown when the backend cannot be reached at all
pub const NETWORK_ERROR_MESSAGE: &str = "No se pudo conectar con el servidor.";

/// Model validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Time string is not `HH:MM`
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// Day range ends before it starts
    #[error("Invalid working hours: {start} - {end}")]
    InvalidHours { start: String, end: String },

    /// Unknown weekday name
    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    /// Unknown appointment status
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
}

/// Error body returned by the backend (`{"error": "..."}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Extract the user-facing message from a raw response body.
    ///
    /// Falls back to [`DEFAULT_ERROR_MESSAGE`] when the body is not JSON or
    /// has no usable `error` field.
    pub fn message_from(body: &str) -> String {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
    }
}
