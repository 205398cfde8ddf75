//! Back-office management screens
//!
//! Every panel edits a local list first and optionally syncs creations to the
//! backend. A failed sync is logged (the HTTP client already toasted it) and
//! the local change stays in place.

pub mod branches;
pub mod schedule;
pub mod services;
pub mod staff;
pub mod store;

use thiserror::Error;

pub use branches::{BranchForm, BranchesPanel};
pub use schedule::{ScheduleEditor, TimeEdge};
pub use services::{ServiceForm, ServicesPanel};
pub use staff::{StaffForm, StaffPanel};
pub use store::{CrudStore, Editor, Record};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Field '{0}' is required")]
    Required(&'static str),

    #[error("Record {0} not found")]
    NotFound(i64),

    #[error("No form is open")]
    NoForm,

    #[error(transparent)]
    Invalid(#[from] shared::ModelError),
}

/// Trimmed value of a required field
pub(crate) fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, FormError> {
    match value.trim() {
        "" => Err(FormError::Required(field)),
        trimmed => Ok(trimmed),
    }
}

/// Trimmed optional field, `None` when blank
pub(crate) fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
