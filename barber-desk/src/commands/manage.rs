//! Back-office commands

use anyhow::{Context, Result, anyhow};
use shared::models::{parse_weekday, weekday_label, WeeklySchedule};

use barber_desk::admin::{BranchesPanel, ScheduleEditor, ServicesPanel, StaffPanel};
use barber_desk::Route;

use super::{money, Session};

fn status_label(active: bool) -> &'static str {
    if active { "activo" } else { "inactivo" }
}

pub async fn branches(session: &Session, search: &str) -> Result<()> {
    session.enter(Route::AdminBranches)?;
    let panel = BranchesPanel::load(&session.client).await?;
    for branch in panel.store().search(search) {
        println!(
            "  #{:<4} {:<20} {:<28} {:<14} {}",
            branch.id,
            branch.name,
            branch.address,
            branch.phone.as_deref().unwrap_or("-"),
            status_label(branch.is_active)
        );
    }
    Ok(())
}

pub async fn services(session: &Session, search: &str) -> Result<()> {
    session.enter(Route::AdminServices)?;
    let mut panel = ServicesPanel::load(&session.client).await?;
    panel.set_search(search);
    println!(
        "{} servicios activos · {} inactivos",
        panel.active_count(),
        panel.inactive_count()
    );
    for service in panel.visible() {
        println!(
            "  #{:<4} {:<22} {:>4} min {:>10}  {}",
            service.id,
            service.name,
            service.duration,
            money(service.price),
            status_label(service.is_active)
        );
    }
    Ok(())
}

pub async fn staff(session: &Session, search: &str) -> Result<()> {
    session.enter(Route::AdminStaff)?;
    let mut panel = StaffPanel::load(&session.client).await?;
    panel.set_search(search);
    println!("{} barberos activos", panel.active_count());
    for barber in panel.visible() {
        println!(
            "  #{:<4} {:<20} {:<18} {:<26} {}",
            barber.id,
            barber.name,
            barber.specialty.as_deref().unwrap_or("-"),
            barber.email.as_deref().unwrap_or("-"),
            status_label(barber.is_active)
        );
    }
    Ok(())
}

pub async fn add_service(
    session: &Session,
    name: String,
    description: String,
    duration: String,
    price: String,
) -> Result<()> {
    session.enter(Route::AdminServices)?;
    let mut panel = ServicesPanel::load(&session.client).await?;
    let form = panel.open_create();
    form.name = name;
    form.description = description;
    form.duration = duration;
    form.price = price;

    let id = panel.save(Some(&session.client)).await?;
    let saved = panel
        .store()
        .get(id)
        .ok_or_else(|| anyhow!("Service {id} missing after save"))?;
    println!("Servicio #{}: {}", saved.id, saved.label());
    Ok(())
}

pub async fn add_staff(
    session: &Session,
    name: String,
    email: String,
    phone: String,
    specialty: String,
    branch: Option<i64>,
) -> Result<()> {
    session.enter(Route::AdminStaff)?;
    let mut panel = StaffPanel::load(&session.client).await?;
    let form = panel.open_create();
    form.name = name;
    form.email = email;
    form.phone = phone;
    form.specialty = specialty;
    form.branch_id = branch;

    let id = panel.save(Some(&session.client)).await?;
    println!("Barbero #{id} registrado.");
    Ok(())
}

fn print_week(schedule: &WeeklySchedule) {
    for day in WeeklySchedule::WEEK {
        let entry = schedule.day(day);
        let hours = match entry.hours() {
            Some((start, end)) => format!("{} - {}", start.format("%H:%M"), end.format("%H:%M")),
            None => "cerrado".to_string(),
        };
        println!("  {:<10} {hours}", weekday_label(day));
    }
}

/// Parse `DAY=HH:MM-HH:MM`
fn parse_assignment(value: &str) -> Result<(chrono::Weekday, &str, &str)> {
    let (day, range) = value
        .split_once('=')
        .with_context(|| format!("Expected DAY=HH:MM-HH:MM, got '{value}'"))?;
    let (start, end) = range
        .split_once('-')
        .with_context(|| format!("Expected HH:MM-HH:MM, got '{range}'"))?;
    Ok((parse_weekday(day)?, start, end))
}

pub async fn schedule(
    session: &Session,
    barber: i64,
    branch: Option<i64>,
    toggles: &[String],
    assignments: &[String],
    apply_all: Option<&str>,
) -> Result<()> {
    session.enter(Route::AdminSchedules)?;
    let mut editor = ScheduleEditor::new(session.catalog().await?);
    editor.select_barber(barber)?;
    if let Some(branch) = branch {
        editor.select_branch(branch)?;
    }

    for day in toggles {
        editor.toggle(parse_weekday(day)?);
    }
    for assignment in assignments {
        let (day, start, end) = parse_assignment(assignment)?;
        editor.set_hours(day, start, end)?;
    }
    if let Some(day) = apply_all {
        editor.apply_to_all(parse_weekday(day)?);
    }

    let name = editor.barber().map(|b| b.name.clone()).unwrap_or_default();
    let enabled = editor.enabled_count();
    let schedule = editor.save()?;
    session
        .schedules
        .save(barber, schedule)
        .context("Failed to write the saved schedule")?;
    println!("Horario de {name} ({enabled} días activos):");
    print_week(schedule);
    Ok(())
}
