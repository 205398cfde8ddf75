//! Desk error types

use thiserror::Error;

use crate::admin::FormError;
use crate::booking::WizardError;

/// Top-level error for screen operations
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("Client error: {0}")]
    Client(#[from] barber_client::ClientError),

    #[error("Booking error: {0}")]
    Booking(#[from] WizardError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Model error: {0}")]
    Model(#[from] shared::ModelError),

    /// Route the session's role may not open
    #[error("Route {0} is not available for this session")]
    Forbidden(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type DeskResult<T> = Result<T, DeskError>;
