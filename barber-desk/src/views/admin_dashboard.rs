//! Admin dashboard: every appointment with status chips and search

use barber_client::{BookingApi, ClientResult};
use chrono::NaiveDate;
use shared::models::{Appointment, AppointmentStatus};
use shared::Decimal;

use super::filter::{matches_search, StatusFilter};
use super::AppointmentRow;
use crate::catalog::Catalog;

/// Appointment count per status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn tally<'a>(appointments: impl IntoIterator<Item = &'a Appointment>) -> Self {
        let mut counts = Self::default();
        for appointment in appointments {
            *counts.slot_mut(appointment.status) += 1;
        }
        counts
    }

    fn slot_mut(&mut self, status: AppointmentStatus) -> &mut usize {
        match status {
            AppointmentStatus::Pending => &mut self.pending,
            AppointmentStatus::InProgress => &mut self.in_progress,
            AppointmentStatus::Completed => &mut self.completed,
            AppointmentStatus::Cancelled => &mut self.cancelled,
        }
    }

    pub fn get(&self, status: AppointmentStatus) -> usize {
        match status {
            AppointmentStatus::Pending => self.pending,
            AppointmentStatus::InProgress => self.in_progress,
            AppointmentStatus::Completed => self.completed,
            AppointmentStatus::Cancelled => self.cancelled,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed + self.cancelled
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminDashboard {
    catalog: Catalog,
    appointments: Vec<Appointment>,
    status: StatusFilter,
    search: String,
}

impl AdminDashboard {
    pub fn new(catalog: Catalog, appointments: Vec<Appointment>) -> Self {
        Self {
            catalog,
            appointments,
            status: StatusFilter::All,
            search: String::new(),
        }
    }

    pub async fn load(api: &dyn BookingApi) -> ClientResult<Self> {
        let catalog = Catalog::load(api).await?;
        let appointments = api.list_appointments().await?;
        tracing::debug!(appointments = appointments.len(), "Admin dashboard loaded");
        Ok(Self::new(catalog, appointments))
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.status = status;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    fn is_visible(&self, appointment: &Appointment) -> bool {
        self.status.matches(appointment.status)
            && matches_search(
                &[
                    appointment.client.as_str(),
                    self.catalog.barber_name(appointment.barber_id),
                ],
                &self.search,
            )
    }

    /// Appointments passing the status filter and the client/barber search
    pub fn filtered(&self) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| self.is_visible(a))
            .collect()
    }

    /// Table rows, soonest first
    pub fn rows(&self) -> Vec<AppointmentRow> {
        let mut rows: Vec<_> = self
            .filtered()
            .into_iter()
            .map(|a| AppointmentRow::resolve(a, &self.catalog))
            .collect();
        rows.sort_by_key(|r| r.start);
        rows
    }

    /// Counts over the unfiltered list
    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.appointments)
    }

    /// Revenue of `date`, cancelled appointments excluded
    pub fn day_revenue(&self, date: NaiveDate) -> Decimal {
        self.appointments
            .iter()
            .filter(|a| a.date() == date && a.status.is_blocking())
            .map(|a| self.catalog.appointment_price(a))
            .sum()
    }

    /// Appointments scheduled on `date`, cancelled ones excluded
    pub fn day_count(&self, date: NaiveDate) -> usize {
        self.appointments
            .iter()
            .filter(|a| a.date() == date && a.status.is_blocking())
            .count()
    }
}
