//! Barber Client - HTTP client for the booking backend
//!
//! Provides network-based calls to the REST API with bearer auth, error
//! notifications and the 401 redirect to the login route.

pub mod api;
pub mod config;
pub mod error;
pub mod hooks;
pub mod http;
pub mod token;

pub use api::{paths, BookingApi};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use hooks::{LogNavigator, LogNotifier, Navigator, Notifier, Toast, ToastLevel, ToastQueue, LOGIN_PATH};
pub use http::{HttpClient, RequestOptions};
pub use ::http::StatusCode;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};

// Re-export shared types for convenience
pub use shared::models::{
    Appointment, AppointmentCreate, AppointmentStatus, Barber, BarberCreate, Branch, Service,
    ServiceCreate,
};
