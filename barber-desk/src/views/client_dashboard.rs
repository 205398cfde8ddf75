//! Client profile: next appointment, cut history and stats

use std::collections::HashMap;

use barber_client::{BookingApi, ClientResult};
use chrono::NaiveDateTime;
use shared::models::{Appointment, AppointmentStatus};
use shared::Decimal;

use super::AppointmentRow;
use crate::catalog::Catalog;

/// How the logged-in client is recognised in `/turnos`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientKey {
    Id(i64),
    /// Display name, compared case-insensitively
    Name(String),
}

impl ClientKey {
    pub fn owns(&self, appointment: &Appointment) -> bool {
        match self {
            Self::Id(id) => appointment.client_id == Some(*id),
            Self::Name(name) => appointment.client.trim().to_lowercase() == name.trim().to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientStats {
    /// Completed appointments
    pub completed_cuts: usize,
    pub favourite_barber: Option<String>,
    pub usual_branch: Option<String>,
    /// Sum over completed appointments
    pub total_spent: Decimal,
}

#[derive(Debug, Clone)]
pub struct ClientDashboard {
    catalog: Catalog,
    /// The client's own appointments, oldest first
    appointments: Vec<Appointment>,
    now: NaiveDateTime,
}

/// Most frequent id, ties going to the most recent appointment
fn most_frequent<'a>(
    appointments: impl Iterator<Item = &'a Appointment>,
    key: fn(&Appointment) -> i64,
) -> Option<i64> {
    let mut seen: HashMap<i64, (usize, NaiveDateTime)> = HashMap::new();
    for appointment in appointments {
        let entry = seen.entry(key(appointment)).or_insert((0, appointment.start));
        entry.0 += 1;
        entry.1 = entry.1.max(appointment.start);
    }
    seen.into_iter()
        .max_by_key(|(_, (count, last))| (*count, *last))
        .map(|(id, _)| id)
}

impl ClientDashboard {
    pub fn new(
        catalog: Catalog,
        appointments: Vec<Appointment>,
        client: &ClientKey,
        now: NaiveDateTime,
    ) -> Self {
        let mut appointments: Vec<_> = appointments
            .into_iter()
            .filter(|a| client.owns(a))
            .collect();
        appointments.sort_by_key(|a| a.start);
        Self {
            catalog,
            appointments,
            now,
        }
    }

    pub async fn load(
        api: &dyn BookingApi,
        client: &ClientKey,
        now: NaiveDateTime,
    ) -> ClientResult<Self> {
        let catalog = Catalog::load(api).await?;
        let appointments = api.list_appointments().await?;
        Ok(Self::new(catalog, appointments, client, now))
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    fn is_upcoming(&self, appointment: &Appointment) -> bool {
        appointment.start >= self.now
            && matches!(
                appointment.status,
                AppointmentStatus::Pending | AppointmentStatus::InProgress
            )
    }

    /// Soonest upcoming appointment that is still on
    pub fn next_appointment(&self) -> Option<AppointmentRow> {
        self.appointments
            .iter()
            .find(|a| self.is_upcoming(a))
            .map(|a| AppointmentRow::resolve(a, &self.catalog))
    }

    /// Past or finished appointments, newest first
    pub fn history(&self) -> Vec<AppointmentRow> {
        self.appointments
            .iter()
            .rev()
            .filter(|a| !self.is_upcoming(a))
            .map(|a| AppointmentRow::resolve(a, &self.catalog))
            .collect()
    }

    pub fn stats(&self) -> ClientStats {
        let completed = || {
            self.appointments
                .iter()
                .filter(|a| a.status == AppointmentStatus::Completed)
        };

        ClientStats {
            completed_cuts: completed().count(),
            favourite_barber: most_frequent(completed(), |a| a.barber_id)
                .map(|id| self.catalog.barber_name(id).to_string()),
            usual_branch: most_frequent(completed(), |a| a.branch_id)
                .map(|id| self.catalog.branch_name(id).to_string()),
            total_spent: completed().map(|a| self.catalog.appointment_price(a)).sum(),
        }
    }
}
