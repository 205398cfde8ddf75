//! Shared types for the barbershop front-end
//!
//! Records mirrored from the booking backend, the weekly schedule model and
//! the error body format used by the REST API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiErrorBody, ModelError, DEFAULT_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};
