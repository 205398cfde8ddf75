//! Barber Desk - screens of the barbershop booking front-end
//!
//! Each screen owns an explicit state container that is loaded from the
//! backend on mount, mutated through its operations and optionally synced
//! back through [`barber_client::BookingApi`].
//!
//! - [`booking`]: the five-step booking wizard and slot availability
//! - [`views`]: client and admin dashboards with local filtering
//! - [`admin`]: branch, service, staff and schedule management
//! - [`routes`]: route table and navigation state
//! - [`storage`]: saved weekly hours and session role

pub mod admin;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logger;
pub mod routes;
pub mod storage;
pub mod views;

pub use catalog::Catalog;
pub use config::DeskConfig;
pub use error::{DeskError, DeskResult};
pub use routes::{Role, Route, Router};
pub use storage::{RoleFile, ScheduleFile};
