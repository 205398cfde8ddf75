//! Booking wizard state container
//!
//! Steps run in a fixed order: branch, service, barber, date/time, confirm.
//! A selection is only accepted on its own step, "Next" requires the current
//! step's selection, and changing an upstream choice clears what depends on it.

use barber_client::BookingApi;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use shared::models::{
    Appointment, AppointmentCreate, Barber, Branch, Service, WeeklySchedule, weekday_abbr,
};
use shared::Decimal;
use thiserror::Error;

use super::slots::{self, Slot, SlotOptions, SlotPolicy, DEFAULT_SLOT_MINUTES};
use crate::catalog::Catalog;

/// Label used for the "any barber" choice
pub const FIRST_AVAILABLE: &str = "Primer disponible";

/// Number of bookable dates offered by default
pub const DEFAULT_BOOKING_DAYS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Branch,
    Service,
    Barber,
    DateTime,
    Confirm,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Self::Branch,
        Self::Service,
        Self::Barber,
        Self::DateTime,
        Self::Confirm,
    ];

    /// 1-based position shown in the progress bar
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Branch => "Sucursal",
            Self::Service => "Servicio",
            Self::Barber => "Barbero",
            Self::DateTime => "Fecha & Hora",
            Self::Confirm => "Confirmar",
        }
    }

    fn next(&self) -> Option<Step> {
        Self::ALL.get(*self as usize + 1).copied()
    }

    fn prev(&self) -> Option<Step> {
        (*self as usize).checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Barber picked in step 3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarberChoice {
    Barber(i64),
    /// Let the shop assign whoever is free at the chosen time
    FirstAvailable,
}

/// Outcome of "Back"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    Moved(Step),
    /// Back on the first step leaves the wizard
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Unknown branch: {0}")]
    UnknownBranch(i64),

    #[error("Unknown service: {0}")]
    UnknownService(i64),

    #[error("Unknown barber: {0}")]
    UnknownBarber(i64),

    #[error("Barber {barber} does not work at branch {branch}")]
    BarberNotInBranch { barber: i64, branch: i64 },

    #[error("Date option {0} does not exist")]
    DateOutOfRange(usize),

    #[error("Slot {0} is not available")]
    SlotUnavailable(String),

    #[error("Selection for step {selection} is not allowed on step {current}")]
    WrongStep { selection: Step, current: Step },

    #[error("Step {0} needs a selection before continuing")]
    MissingSelection(Step),

    #[error("No barber is free at the chosen time")]
    NoBarberAvailable,

    #[error("The booking is already confirmed")]
    AlreadyConfirmed,

    /// Backend rejected the booking; carries the message shown to the user
    #[error("{0}")]
    Submit(String),
}

/// Wizard settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardConfig {
    /// First bookable date
    pub today: NaiveDate,
    pub booking_days: usize,
    pub slot_minutes: u32,
    pub policy: SlotPolicy,
}

impl WizardConfig {
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            today,
            booking_days: DEFAULT_BOOKING_DAYS,
            slot_minutes: DEFAULT_SLOT_MINUTES,
            policy: SlotPolicy::default(),
        }
    }
}

/// The next `count` dates from `from` on which the shop opens
pub fn upcoming_dates(from: NaiveDate, count: usize, week: &WeeklySchedule) -> Vec<NaiveDate> {
    if week.enabled_count() == 0 {
        return Vec::new();
    }
    from.iter_days()
        .filter(|d| week.is_working(d.weekday()))
        .take(count)
        .collect()
}

fn month_abbr(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
    ];
    MONTHS.get(month as usize - 1).copied().unwrap_or("")
}

/// Short date label, e.g. `Lun 23 Feb`
pub fn date_label(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        weekday_abbr(date.weekday()),
        date.day(),
        month_abbr(date.month())
    )
}

/// Data shown on the confirm step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    pub branch: String,
    /// Service name and duration
    pub service: String,
    pub barber: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub total: Decimal,
}

impl BookingSummary {
    pub fn date_label(&self) -> String {
        date_label(self.date)
    }

    pub fn time_label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// Booking wizard screen
#[derive(Debug, Clone)]
pub struct BookingWizard {
    catalog: Catalog,
    appointments: Vec<Appointment>,
    config: WizardConfig,
    dates: Vec<NaiveDate>,
    client_id: Option<i64>,

    step: Step,
    branch: Option<i64>,
    service: Option<i64>,
    barber: Option<BarberChoice>,
    date: Option<usize>,
    time: Option<NaiveTime>,

    error: Option<String>,
    confirmed: Option<Appointment>,
}

impl BookingWizard {
    pub fn new(catalog: Catalog, appointments: Vec<Appointment>, config: WizardConfig) -> Self {
        let dates = upcoming_dates(config.today, config.booking_days, &WeeklySchedule::default());
        Self {
            catalog,
            appointments,
            config,
            dates,
            client_id: None,
            step: Step::Branch,
            branch: None,
            service: None,
            barber: None,
            date: None,
            time: None,
            error: None,
            confirmed: None,
        }
    }

    /// Fetch everything the wizard needs and start on the first step
    pub async fn load(api: &dyn BookingApi, config: WizardConfig) -> barber_client::ClientResult<Self> {
        let catalog = Catalog::load(api).await?;
        let appointments = api.list_appointments().await?;
        Ok(Self::new(catalog, appointments, config))
    }

    /// Attach the booking to a known client
    pub fn with_client(mut self, client_id: i64) -> Self {
        self.client_id = Some(client_id);
        self
    }

    // ========== Accessors ==========

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn selected_branch(&self) -> Option<&Branch> {
        self.branch.and_then(|id| self.catalog.branch(id))
    }

    pub fn selected_service(&self) -> Option<&Service> {
        self.service.and_then(|id| self.catalog.service(id))
    }

    pub fn selected_barber(&self) -> Option<BarberChoice> {
        self.barber
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.date.and_then(|i| self.dates.get(i).copied())
    }

    pub fn selected_time(&self) -> Option<NaiveTime> {
        self.time
    }

    /// Server message of the last failed submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed.is_some()
    }

    /// Created appointment once the backend accepted the booking
    pub fn confirmation(&self) -> Option<&Appointment> {
        self.confirmed.as_ref()
    }

    // ========== Options per step ==========

    /// Active branches
    pub fn branches(&self) -> Vec<&Branch> {
        self.catalog.branches.iter().filter(|b| b.is_active).collect()
    }

    /// Active services
    pub fn services(&self) -> Vec<&Service> {
        self.catalog.services.iter().filter(|s| s.is_active).collect()
    }

    /// Active barbers of the selected branch
    pub fn barbers(&self) -> Vec<&Barber> {
        self.branch
            .map(|id| self.catalog.active_barbers_at(id))
            .unwrap_or_default()
    }

    pub fn date_options(&self) -> &[NaiveDate] {
        &self.dates
    }

    fn slot_options(&self) -> SlotOptions {
        SlotOptions {
            increment: self.config.slot_minutes,
            policy: self.config.policy,
            service_minutes: self
                .service
                .map_or(DEFAULT_SLOT_MINUTES, |id| self.catalog.service_minutes(id)),
        }
    }

    /// Slots for the selected barber and date; empty until both are chosen
    pub fn slots(&self) -> Vec<Slot> {
        let (Some(choice), Some(date)) = (self.barber, self.selected_date()) else {
            return Vec::new();
        };
        let options = self.slot_options();
        match choice {
            BarberChoice::Barber(id) => self
                .catalog
                .barber(id)
                .map(|b| slots::barber_slots(b, date, &self.appointments, &self.catalog, &options))
                .unwrap_or_default(),
            BarberChoice::FirstAvailable => slots::any_barber_slots(
                &self.barbers(),
                date,
                &self.appointments,
                &self.catalog,
                &options,
            ),
        }
    }

    // ========== Selections ==========

    fn ensure_editable(&self, selection: Step) -> Result<(), WizardError> {
        if self.confirmed.is_some() {
            return Err(WizardError::AlreadyConfirmed);
        }
        if self.step != selection {
            return Err(WizardError::WrongStep {
                selection,
                current: self.step,
            });
        }
        Ok(())
    }

    pub fn select_branch(&mut self, id: i64) -> Result<(), WizardError> {
        self.ensure_editable(Step::Branch)?;
        if !self.branches().iter().any(|b| b.id == id) {
            return Err(WizardError::UnknownBranch(id));
        }
        if self.branch != Some(id) {
            self.branch = Some(id);
            self.barber = None;
            self.date = None;
            self.time = None;
        }
        Ok(())
    }

    pub fn select_service(&mut self, id: i64) -> Result<(), WizardError> {
        self.ensure_editable(Step::Service)?;
        if !self.services().iter().any(|s| s.id == id) {
            return Err(WizardError::UnknownService(id));
        }
        if self.service != Some(id) {
            self.service = Some(id);
            self.time = None;
        }
        Ok(())
    }

    pub fn select_barber(&mut self, choice: BarberChoice) -> Result<(), WizardError> {
        self.ensure_editable(Step::Barber)?;
        if let BarberChoice::Barber(id) = choice {
            let barber = self.catalog.barber(id).filter(|b| b.is_active);
            match (barber, self.branch) {
                (None, _) => return Err(WizardError::UnknownBarber(id)),
                (Some(b), Some(branch)) if !b.works_at(branch) => {
                    return Err(WizardError::BarberNotInBranch { barber: id, branch });
                }
                _ => {}
            }
        }
        if self.barber != Some(choice) {
            self.barber = Some(choice);
            self.time = None;
        }
        Ok(())
    }

    /// Pick one of [`Self::date_options`] by index
    pub fn select_date(&mut self, index: usize) -> Result<(), WizardError> {
        self.ensure_editable(Step::DateTime)?;
        if index >= self.dates.len() {
            return Err(WizardError::DateOutOfRange(index));
        }
        if self.date != Some(index) {
            self.date = Some(index);
            self.time = None;
        }
        Ok(())
    }

    /// Pick a time; only available slots are accepted
    pub fn select_time(&mut self, time: NaiveTime) -> Result<(), WizardError> {
        self.ensure_editable(Step::DateTime)?;
        let available = self
            .slots()
            .iter()
            .any(|s| s.time == time && s.available);
        if !available {
            return Err(WizardError::SlotUnavailable(time.format("%H:%M").to_string()));
        }
        self.time = Some(time);
        Ok(())
    }

    // ========== Navigation ==========

    /// Whether "Next" is enabled on the current step
    pub fn can_next(&self) -> bool {
        if self.confirmed.is_some() {
            return false;
        }
        match self.step {
            Step::Branch => self.branch.is_some(),
            Step::Service => self.service.is_some(),
            Step::Barber => self.barber.is_some(),
            Step::DateTime => self.date.is_some() && self.time.is_some(),
            Step::Confirm => false,
        }
    }

    pub fn next(&mut self) -> Result<Step, WizardError> {
        if self.confirmed.is_some() {
            return Err(WizardError::AlreadyConfirmed);
        }
        if !self.can_next() {
            return Err(WizardError::MissingSelection(self.step));
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> BackOutcome {
        match self.step.prev() {
            Some(prev) if self.confirmed.is_none() => {
                self.step = prev;
                BackOutcome::Moved(prev)
            }
            _ => BackOutcome::Cancelled,
        }
    }

    // ========== Confirmation ==========

    /// Summary for the confirm step; `None` while a selection is missing
    pub fn summary(&self) -> Option<BookingSummary> {
        let branch = self.selected_branch()?;
        let service = self.selected_service()?;
        let barber = match self.barber? {
            BarberChoice::Barber(id) => self.catalog.barber(id)?.name.clone(),
            BarberChoice::FirstAvailable => FIRST_AVAILABLE.to_string(),
        };
        Some(BookingSummary {
            branch: branch.name.clone(),
            service: service.label(),
            barber,
            date: self.selected_date()?,
            time: self.time?,
            total: service.price,
        })
    }

    fn compose(&self) -> Result<AppointmentCreate, WizardError> {
        use WizardError::MissingSelection;
        let branch_id = self.branch.ok_or(MissingSelection(Step::Branch))?;
        let service_id = self.service.ok_or(MissingSelection(Step::Service))?;
        let choice = self.barber.ok_or(MissingSelection(Step::Barber))?;
        let date = self.selected_date().ok_or(MissingSelection(Step::DateTime))?;
        let time = self.time.ok_or(MissingSelection(Step::DateTime))?;
        let start = NaiveDateTime::new(date, time);

        let barber_id = match choice {
            BarberChoice::Barber(id) => id,
            BarberChoice::FirstAvailable => slots::first_free_barber(
                &self.barbers(),
                start,
                &self.appointments,
                &self.catalog,
                &self.slot_options(),
            )
            .map(|b| b.id)
            .ok_or(WizardError::NoBarberAvailable)?,
        };

        Ok(AppointmentCreate {
            branch_id,
            service_id,
            barber_id,
            start,
            client_id: self.client_id,
        })
    }

    /// Post the booking
    ///
    /// On failure the server's message is kept in [`Self::error`] and the
    /// wizard stays on the confirm step, un-submitted.
    pub async fn submit(&mut self, api: &dyn BookingApi) -> Result<&Appointment, WizardError> {
        if self.confirmed.is_some() {
            return Err(WizardError::AlreadyConfirmed);
        }
        if self.step != Step::Confirm {
            return Err(WizardError::WrongStep {
                selection: Step::Confirm,
                current: self.step,
            });
        }
        let payload = self.compose()?;

        match api.create_appointment(&payload).await {
            Ok(appointment) => {
                tracing::info!(appointment_id = appointment.id, start = %appointment.start, "Booking confirmed");
                self.error = None;
                self.appointments.push(appointment.clone());
                let confirmed: &Appointment = self.confirmed.insert(appointment);
                Ok(confirmed)
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!(error = %e, "Booking rejected");
                self.error = Some(message.clone());
                Err(WizardError::Submit(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use barber_client::{ClientError, ClientResult};
    use shared::models::{AppointmentStatus, BarberCreate, ServiceCreate};
    use std::sync::Mutex;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn barber(id: i64, branch_id: i64) -> Barber {
        Barber {
            id,
            name: format!("Barbero {id}"),
            email: None,
            phone: None,
            specialty: None,
            branch_id: Some(branch_id),
            is_active: true,
            schedule: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Branch {
                    id: 1,
                    name: "Centro".to_string(),
                    address: "Av. Corrientes 1234".to_string(),
                    phone: None,
                    is_active: true,
                },
                Branch {
                    id: 2,
                    name: "Palermo".to_string(),
                    address: "Honduras 4500".to_string(),
                    phone: None,
                    is_active: true,
                },
            ],
            vec![Service {
                id: 10,
                name: "Fade Premium".to_string(),
                description: String::new(),
                duration: 45,
                price: Decimal::from(3200),
                is_active: true,
            }],
            vec![barber(100, 1), barber(101, 1), barber(200, 2)],
        )
    }

    fn booked(id: i64, barber_id: i64, start: &str) -> Appointment {
        Appointment {
            id,
            client: "Juan".to_string(),
            client_id: None,
            barber_id,
            service_id: 10,
            branch_id: 1,
            start: NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M").unwrap(),
            status: AppointmentStatus::Pending,
            price: None,
        }
    }

    // Sunday, so the first bookable date is Monday 2026-02-23
    fn config() -> WizardConfig {
        WizardConfig::starting(NaiveDate::from_ymd_opt(2026, 2, 22).unwrap())
    }

    #[derive(Default)]
    struct FakeApi {
        reject: Option<String>,
        posted: Mutex<Vec<AppointmentCreate>>,
    }

    #[async_trait]
    impl BookingApi for FakeApi {
        async fn list_branches(&self) -> ClientResult<Vec<Branch>> {
            Ok(catalog().branches)
        }
        async fn list_services(&self) -> ClientResult<Vec<Service>> {
            Ok(catalog().services)
        }
        async fn list_staff(&self) -> ClientResult<Vec<Barber>> {
            Ok(catalog().staff)
        }
        async fn list_appointments(&self) -> ClientResult<Vec<Appointment>> {
            Ok(vec![booked(1, 100, "2026-02-23 10:00")])
        }
        async fn create_service(&self, _: &ServiceCreate) -> ClientResult<Service> {
            unimplemented!()
        }
        async fn create_staff(&self, _: &BarberCreate) -> ClientResult<Barber> {
            unimplemented!()
        }
        async fn create_appointment(&self, payload: &AppointmentCreate) -> ClientResult<Appointment> {
            self.posted.lock().unwrap().push(payload.clone());
            if let Some(message) = &self.reject {
                return Err(ClientError::Api {
                    status: http_conflict(),
                    message: message.clone(),
                });
            }
            Ok(Appointment {
                id: 77,
                client: "Juan".to_string(),
                client_id: payload.client_id,
                barber_id: payload.barber_id,
                service_id: payload.service_id,
                branch_id: payload.branch_id,
                start: payload.start,
                status: AppointmentStatus::Pending,
                price: None,
            })
        }
    }

    fn http_conflict() -> barber_client::StatusCode {
        barber_client::StatusCode::CONFLICT
    }

    async fn ready_to_confirm(api: &FakeApi, choice: BarberChoice, time: &str) -> BookingWizard {
        let mut wizard = BookingWizard::load(api, config()).await.unwrap();
        wizard.select_branch(1).unwrap();
        wizard.next().unwrap();
        wizard.select_service(10).unwrap();
        wizard.next().unwrap();
        wizard.select_barber(choice).unwrap();
        wizard.next().unwrap();
        wizard.select_date(0).unwrap();
        wizard.select_time(t(time)).unwrap();
        wizard.next().unwrap();
        wizard
    }

    #[test]
    fn test_step_labels_and_order() {
        let labels: Vec<_> = Step::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            ["Sucursal", "Servicio", "Barbero", "Fecha & Hora", "Confirmar"]
        );
        assert_eq!(Step::Confirm.number(), 5);
        assert_eq!(Step::Confirm.next(), None);
        assert_eq!(Step::Branch.prev(), None);
    }

    #[test]
    fn test_upcoming_dates_skip_days_off() {
        let dates = upcoming_dates(config().today, 6, &WeeklySchedule::default());
        assert_eq!(dates.len(), 6);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2026, 2, 23).unwrap());
        assert!(dates.iter().all(|d| d.weekday() != chrono::Weekday::Sun));
        assert_eq!(date_label(dates[0]), "Lun 23 Feb");

        let mut closed = WeeklySchedule::default();
        for day in WeeklySchedule::WEEK {
            closed.day_mut(day).enabled = false;
        }
        assert!(upcoming_dates(config().today, 6, &closed).is_empty());
    }

    #[test]
    fn test_next_requires_selection() {
        let mut wizard = BookingWizard::new(catalog(), Vec::new(), config());
        assert!(!wizard.can_next());
        assert_eq!(wizard.next(), Err(WizardError::MissingSelection(Step::Branch)));

        assert_eq!(wizard.select_branch(9), Err(WizardError::UnknownBranch(9)));
        assert!(matches!(
            wizard.select_service(10),
            Err(WizardError::WrongStep { .. })
        ));

        wizard.select_branch(1).unwrap();
        assert_eq!(wizard.next(), Ok(Step::Service));
        assert_eq!(wizard.back(), BackOutcome::Moved(Step::Branch));
        assert_eq!(wizard.back(), BackOutcome::Cancelled);
    }

    #[test]
    fn test_barbers_are_filtered_by_branch() {
        let mut wizard = BookingWizard::new(catalog(), Vec::new(), config());
        wizard.select_branch(1).unwrap();
        wizard.next().unwrap();
        wizard.select_service(10).unwrap();
        wizard.next().unwrap();

        let ids: Vec<_> = wizard.barbers().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![100, 101]);
        assert_eq!(
            wizard.select_barber(BarberChoice::Barber(200)),
            Err(WizardError::BarberNotInBranch { barber: 200, branch: 1 })
        );
    }

    #[test]
    fn test_changing_branch_clears_dependent_choices() {
        let mut wizard = BookingWizard::new(catalog(), Vec::new(), config());
        wizard.select_branch(1).unwrap();
        wizard.next().unwrap();
        wizard.select_service(10).unwrap();
        wizard.next().unwrap();
        wizard.select_barber(BarberChoice::Barber(100)).unwrap();

        wizard.back();
        wizard.back();
        wizard.select_branch(2).unwrap();
        assert_eq!(wizard.selected_barber(), None);
        // Service does not depend on the branch
        assert_eq!(wizard.selected_service().map(|s| s.id), Some(10));
    }

    #[test]
    fn test_booked_slot_cannot_be_selected() {
        let appointments = vec![booked(1, 100, "2026-02-23 10:00")];
        let mut wizard = BookingWizard::new(catalog(), appointments, config());
        wizard.select_branch(1).unwrap();
        wizard.next().unwrap();
        wizard.select_service(10).unwrap();
        wizard.next().unwrap();
        wizard.select_barber(BarberChoice::Barber(100)).unwrap();
        wizard.next().unwrap();

        assert!(wizard.slots().is_empty());
        wizard.select_date(0).unwrap();
        assert_eq!(
            wizard.select_time(t("10:00")),
            Err(WizardError::SlotUnavailable("10:00".to_string()))
        );
        assert_eq!(wizard.select_date(42), Err(WizardError::DateOutOfRange(42)));

        wizard.select_time(t("10:30")).unwrap();
        assert!(wizard.can_next());
        // Picking another date drops the time
        wizard.select_date(1).unwrap();
        assert_eq!(wizard.selected_time(), None);
        assert!(!wizard.can_next());
    }

    #[tokio::test]
    async fn test_submit_posts_booking() {
        let api = FakeApi::default();
        let mut wizard = ready_to_confirm(&api, BarberChoice::Barber(101), "10:00")
            .await
            .with_client(5);
        assert!(!wizard.can_next());

        let summary = wizard.summary().unwrap();
        assert_eq!(summary.branch, "Centro");
        assert_eq!(summary.service, "Fade Premium · 45 min");
        assert_eq!(summary.barber, "Barbero 101");
        assert_eq!(summary.time_label(), "10:00");
        assert_eq!(summary.total, Decimal::from(3200));

        let created = wizard.submit(&api).await.unwrap();
        assert_eq!(created.id, 77);
        assert!(wizard.is_confirmed());

        let posted = api.posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].barber_id, 101);
        assert_eq!(posted[0].client_id, Some(5));
        assert_eq!(posted[0].start.to_string(), "2026-02-23 10:00:00");
        drop(posted);

        assert_eq!(wizard.submit(&api).await.unwrap_err(), WizardError::AlreadyConfirmed);
        assert_eq!(wizard.back(), BackOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_first_available_resolves_free_barber() {
        let api = FakeApi::default();
        let mut wizard = ready_to_confirm(&api, BarberChoice::FirstAvailable, "10:00").await;
        assert_eq!(wizard.summary().unwrap().barber, FIRST_AVAILABLE);

        wizard.submit(&api).await.unwrap();
        // Barber 100 already has 10:00
        assert_eq!(api.posted.lock().unwrap()[0].barber_id, 101);
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_state() {
        let api = FakeApi {
            reject: Some("Horario ocupado".to_string()),
            ..FakeApi::default()
        };
        let mut wizard = ready_to_confirm(&api, BarberChoice::Barber(101), "11:00").await;

        let err = wizard.submit(&api).await.unwrap_err();
        assert_eq!(err, WizardError::Submit("Horario ocupado".to_string()));
        assert_eq!(wizard.error(), Some("Horario ocupado"));
        assert!(!wizard.is_confirmed());
        assert_eq!(wizard.step(), Step::Confirm);
        assert_eq!(wizard.selected_time(), Some(t("11:00")));
    }
}
