//! Read-only dashboards over fetched collections

pub mod admin_dashboard;
pub mod client_dashboard;
pub mod filter;

use chrono::NaiveDateTime;
use shared::models::{Appointment, AppointmentStatus};
use shared::Decimal;

use crate::catalog::Catalog;

pub use admin_dashboard::{AdminDashboard, StatusCounts};
pub use client_dashboard::{ClientDashboard, ClientKey, ClientStats};
pub use filter::{matches_search, StatusFilter};

/// Appointment with its references resolved to display names
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentRow {
    pub id: i64,
    pub client: String,
    pub barber: String,
    pub service: String,
    pub branch: String,
    pub start: NaiveDateTime,
    pub status: AppointmentStatus,
    pub price: Decimal,
}

impl AppointmentRow {
    pub fn resolve(appointment: &Appointment, catalog: &Catalog) -> Self {
        Self {
            id: appointment.id,
            client: appointment.client.clone(),
            barber: catalog.barber_name(appointment.barber_id).to_string(),
            service: catalog.service_name(appointment.service_id).to_string(),
            branch: catalog.branch_name(appointment.branch_id).to_string(),
            start: appointment.start,
            status: appointment.status,
            price: catalog.appointment_price(appointment),
        }
    }

    pub fn date_label(&self) -> String {
        self.start.format("%d/%m/%Y").to_string()
    }

    pub fn time_label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }
}
