//! Data models
//!
//! Plain records mirrored from the booking backend (via API).
//! All IDs are `i64`.

pub mod appointment;
pub mod barber;
pub mod branch;
pub mod schedule;
pub mod service;

// Re-exports
pub use appointment::*;
pub use barber::*;
pub use branch::*;
pub use schedule::*;
pub use service::*;
