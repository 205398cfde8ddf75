//! Reference collections fetched on mount and used for name lookups

use std::collections::BTreeMap;

use barber_client::{BookingApi, ClientResult};
use shared::models::{
    Appointment, Barber, Branch, Service, WeeklySchedule, DEFAULT_SERVICE_MINUTES,
};
use shared::Decimal;

/// Placeholder shown for references that no longer resolve
pub const MISSING: &str = "-";

/// Branches, services and staff as last fetched
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub branches: Vec<Branch>,
    pub services: Vec<Service>,
    pub staff: Vec<Barber>,
}

impl Catalog {
    pub fn new(branches: Vec<Branch>, services: Vec<Service>, staff: Vec<Barber>) -> Self {
        Self {
            branches,
            services,
            staff,
        }
    }

    /// Fetch every collection from the backend
    pub async fn load(api: &dyn BookingApi) -> ClientResult<Self> {
        let branches = api.list_branches().await?;
        let services = api.list_services().await?;
        let staff = api.list_staff().await?;
        tracing::debug!(
            branches = branches.len(),
            services = services.len(),
            staff = staff.len(),
            "Catalog loaded"
        );
        Ok(Self::new(branches, services, staff))
    }

    /// Replace the hours of every barber with a saved week
    pub fn with_schedules(mut self, schedules: &BTreeMap<i64, WeeklySchedule>) -> Self {
        for barber in &mut self.staff {
            if let Some(week) = schedules.get(&barber.id) {
                barber.schedule = Some(week.clone());
            }
        }
        self
    }

    pub fn branch(&self, id: i64) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }

    pub fn service(&self, id: i64) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn barber(&self, id: i64) -> Option<&Barber> {
        self.staff.iter().find(|b| b.id == id)
    }

    pub fn branch_name(&self, id: i64) -> &str {
        self.branch(id).map_or(MISSING, |b| b.name.as_str())
    }

    pub fn service_name(&self, id: i64) -> &str {
        self.service(id).map_or(MISSING, |s| s.name.as_str())
    }

    pub fn barber_name(&self, id: i64) -> &str {
        self.barber(id).map_or(MISSING, |b| b.name.as_str())
    }

    /// Service duration in minutes
    pub fn service_minutes(&self, id: i64) -> u32 {
        self.service(id).map_or(DEFAULT_SERVICE_MINUTES, |s| s.duration)
    }

    /// Charged price, falling back to the service's list price
    pub fn appointment_price(&self, appointment: &Appointment) -> Decimal {
        appointment
            .price
            .or_else(|| self.service(appointment.service_id).map(|s| s.price))
            .unwrap_or(Decimal::ZERO)
    }

    /// Active barbers working at a branch
    pub fn active_barbers_at(&self, branch_id: i64) -> Vec<&Barber> {
        self.staff
            .iter()
            .filter(|b| b.is_active && b.works_at(branch_id))
            .collect()
    }
}
