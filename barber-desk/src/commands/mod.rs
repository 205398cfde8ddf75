//! Subcommand handlers: one screen per command

mod booking;
mod dashboard;
mod manage;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use barber_client::{HttpClient, LogNotifier};
use chrono::{NaiveDate, NaiveTime};
use shared::Decimal;

use barber_desk::booking::BarberChoice;
use barber_desk::{Catalog, DeskConfig, Role, RoleFile, Route, Router, ScheduleFile};

use crate::Command;

/// HTTP client and navigation state shared by the handlers
pub struct Session {
    pub config: DeskConfig,
    pub client: HttpClient,
    pub router: Arc<Router>,
    pub role: RoleFile,
    pub schedules: ScheduleFile,
}

impl Session {
    pub fn open(config: DeskConfig) -> Result<Self> {
        let router = Arc::new(Router::default());
        let client = config
            .client_config()
            .build_http_client()
            .context("Failed to build HTTP client")?
            .with_token_store(Arc::new(config.token_store()))
            .with_notifier(Arc::new(LogNotifier))
            .with_navigator(router.clone());
        Ok(Self {
            role: config.role_file(),
            schedules: config.schedule_file(),
            config,
            client,
            router,
        })
    }

    /// Open `route` for the logged-in user's role
    pub fn enter(&self, route: Route) -> Result<()> {
        if !self.client.is_logged_in() {
            self.router.go(Route::Login);
            bail!("No session: run `barber-desk login --token <TOKEN>` first");
        }
        self.router.enter(route, self.role.load())?;
        tracing::debug!(route = route.path(), title = route.title(), "Screen opened");
        Ok(())
    }

    /// Reference collections with the saved weekly hours applied
    pub async fn catalog(&self) -> Result<Catalog> {
        let catalog = Catalog::load(&self.client).await?;
        Ok(catalog.with_schedules(&self.schedules.load()))
    }
}

pub async fn run(command: Command, config: DeskConfig) -> Result<()> {
    let session = Session::open(config)?;

    let result = match command {
        Command::Login { token, role } => login(&session, &token, &role),
        Command::Logout => {
            session.client.logout()?;
            session.role.clear()?;
            session.router.go(Route::Login);
            println!("Sesión cerrada.");
            Ok(())
        }
        Command::Routes => {
            for route in Route::ALL {
                println!("{:<20} {}", route.path(), route.title());
            }
            Ok(())
        }
        Command::Branches { search } => manage::branches(&session, &search).await,
        Command::Services { search } => manage::services(&session, &search).await,
        Command::Staff { search } => manage::staff(&session, &search).await,
        Command::AddService {
            name,
            description,
            duration,
            price,
        } => manage::add_service(&session, name, description, duration, price).await,
        Command::AddStaff {
            name,
            email,
            phone,
            specialty,
            branch,
        } => manage::add_staff(&session, name, email, phone, specialty, branch).await,
        Command::Schedule {
            barber,
            branch,
            toggle,
            set,
            apply_all,
        } => manage::schedule(&session, barber, branch, &toggle, &set, apply_all.as_deref()).await,
        Command::Appointments {
            status,
            search,
            date,
        } => dashboard::appointments(&session, &status, &search, date.as_deref()).await,
        Command::Client { name, id } => dashboard::client(&session, name, id).await,
        Command::Slots {
            branch,
            service,
            barber,
            date,
        } => booking::slots(&session, branch, service, &barber, date.as_deref()).await,
        Command::Book {
            branch,
            service,
            barber,
            date,
            time,
            client_id,
            yes,
        } => {
            let request = booking::BookRequest {
                branch,
                service,
                barber: parse_barber(&barber)?,
                date: parse_date(&date)?,
                time: parse_time(&time)?,
                client_id,
                confirm: yes,
            };
            booking::book(&session, request).await
        }
    };

    if let Err(e) = &result {
        tracing::debug!(error = %e, route = session.router.current().path(), "Command failed");
    }
    result
}

fn login(session: &Session, token: &str, role: &str) -> Result<()> {
    let role = match role.trim().to_lowercase().as_str() {
        "client" | "cliente" => Role::Client,
        "admin" => Role::Admin,
        other => bail!("Unknown role '{other}' (client, admin)"),
    };
    let token = token.trim();
    if token.is_empty() {
        bail!("Token must not be empty");
    }
    session.client.set_token(token)?;
    session.role.save(role)?;
    let landing = session.router.open(role.landing(), Some(role));
    tracing::info!(path = landing.path(), "Logged in");
    println!("Sesión iniciada. Inicio: {} ({})", landing.path(), landing.title());
    Ok(())
}

pub fn parse_barber(value: &str) -> Result<BarberChoice> {
    match value.trim().to_lowercase().as_str() {
        "any" | "primer" | "primer-disponible" => Ok(BarberChoice::FirstAvailable),
        other => other
            .parse()
            .map(BarberChoice::Barber)
            .with_context(|| format!("Barber must be an id or 'any', got '{value}'")),
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{value}', expected YYYY-MM-DD"))
}

pub fn parse_time(value: &str) -> Result<NaiveTime> {
    Ok(shared::models::parse_hhmm(value)?)
}

pub fn money(amount: Decimal) -> String {
    format!("${}", amount.round_dp(2).normalize())
}

/// Local calendar date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
