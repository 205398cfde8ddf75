//! Booking wizard commands

use anyhow::{Result, anyhow, bail};
use barber_client::BookingApi;
use chrono::{NaiveDate, NaiveTime};

use barber_desk::booking::wizard::date_label;
use barber_desk::booking::{BarberChoice, BookingWizard};
use barber_desk::Route;

use super::{money, today, Session};

pub struct BookRequest {
    pub branch: i64,
    pub service: i64,
    pub barber: BarberChoice,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub client_id: Option<i64>,
    pub confirm: bool,
}

/// Walk the wizard up to the date/time step
async fn wizard_at_datetime(
    session: &Session,
    branch: i64,
    service: i64,
    barber: BarberChoice,
) -> Result<BookingWizard> {
    session.enter(Route::ClientBooking)?;
    let config = session.config.wizard_config(today());
    let catalog = session.catalog().await?;
    let appointments = session.client.list_appointments().await?;
    let mut wizard = BookingWizard::new(catalog, appointments, config);

    wizard.select_branch(branch)?;
    wizard.next()?;
    wizard.select_service(service)?;
    wizard.next()?;
    wizard.select_barber(barber)?;
    wizard.next()?;
    Ok(wizard)
}

fn date_index(wizard: &BookingWizard, date: NaiveDate) -> Result<usize> {
    wizard
        .date_options()
        .iter()
        .position(|d| *d == date)
        .ok_or_else(|| anyhow!("{date} is not bookable, run `slots` to see the available dates"))
}

pub async fn slots(
    session: &Session,
    branch: i64,
    service: i64,
    barber: &str,
    date: Option<&str>,
) -> Result<()> {
    let barber = super::parse_barber(barber)?;
    let mut wizard = wizard_at_datetime(session, branch, service, barber).await?;

    let Some(date) = date else {
        println!("Fechas disponibles:");
        for date in wizard.date_options() {
            println!("  {date}  {}", date_label(*date));
        }
        return Ok(());
    };

    let date = super::parse_date(date)?;
    wizard.select_date(date_index(&wizard, date)?)?;
    let slots = wizard.slots();
    if slots.is_empty() {
        println!("Sin horarios para {}.", date_label(date));
        return Ok(());
    }
    println!("{}:", date_label(date));
    for slot in slots {
        let state = if slot.available { "libre" } else { "ocupado" };
        println!("  {}  {state}", slot.label());
    }
    Ok(())
}

pub async fn book(session: &Session, request: BookRequest) -> Result<()> {
    let mut wizard =
        wizard_at_datetime(session, request.branch, request.service, request.barber).await?;
    if let Some(client_id) = request.client_id {
        wizard = wizard.with_client(client_id);
    }

    wizard.select_date(date_index(&wizard, request.date)?)?;
    wizard.select_time(request.time)?;
    wizard.next()?;

    let summary = wizard
        .summary()
        .ok_or_else(|| anyhow!("Booking summary is incomplete"))?;
    println!("Sucursal: {}", summary.branch);
    println!("Servicio: {}", summary.service);
    println!("Barbero:  {}", summary.barber);
    println!("Fecha:    {}", summary.date_label());
    println!("Hora:     {}", summary.time_label());
    println!("Total:    {}", money(summary.total));

    if !request.confirm {
        println!("Agregá --yes para confirmar el turno.");
        return Ok(());
    }

    match wizard.submit(&session.client).await {
        Ok(appointment) => {
            println!("¡Turno confirmado! #{}", appointment.id);
            session.router.go(Route::ClientHome);
            Ok(())
        }
        Err(e) => bail!("No se pudo confirmar el turno: {e}"),
    }
}
