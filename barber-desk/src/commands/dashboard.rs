//! Dashboard commands

use anyhow::{Result, bail};
use shared::models::AppointmentStatus;

use barber_desk::views::{AdminDashboard, AppointmentRow, ClientDashboard, ClientKey, StatusFilter};
use barber_desk::Route;

use super::{money, parse_date, today, Session};

fn print_row(row: &AppointmentRow) {
    println!(
        "  #{:<5} {} {}  {:<18} {:<16} {:<18} {:<10} {}",
        row.id,
        row.date_label(),
        row.time_label(),
        row.client,
        row.barber,
        row.service,
        row.status.as_str(),
        money(row.price)
    );
}

pub async fn appointments(
    session: &Session,
    status: &str,
    search: &str,
    date: Option<&str>,
) -> Result<()> {
    session.enter(Route::AdminHome)?;
    let day = date.map(parse_date).transpose()?.unwrap_or_else(today);

    let mut dashboard = AdminDashboard::load(&session.client).await?;
    dashboard.set_status_filter(status.parse::<StatusFilter>()?);
    dashboard.set_search(search);

    println!(
        "Turnos de {day}: {} · Ingresos: {}",
        dashboard.day_count(day),
        money(dashboard.day_revenue(day))
    );
    let counts = dashboard.counts();
    let chips: Vec<_> = AppointmentStatus::ALL
        .iter()
        .map(|s| format!("{s}: {}", counts.get(*s)))
        .collect();
    println!("{}", chips.join(" · "));

    let rows = dashboard.rows();
    if rows.is_empty() {
        println!("No se encontraron turnos.");
    }
    for row in &rows {
        print_row(row);
    }
    Ok(())
}

pub async fn client(session: &Session, name: Option<String>, id: Option<i64>) -> Result<()> {
    let key = match (id, name) {
        (Some(id), _) => ClientKey::Id(id),
        (None, Some(name)) => ClientKey::Name(name),
        (None, None) => bail!("Pass --name or --id"),
    };
    session.enter(Route::ClientHome)?;

    let now = chrono::Local::now().naive_local();
    let dashboard = ClientDashboard::load(&session.client, &key, now).await?;

    match dashboard.next_appointment() {
        Some(next) => {
            println!("Próximo turno:");
            print_row(&next);
        }
        None => println!("Sin turnos próximos."),
    }

    let stats = dashboard.stats();
    println!("Cortes totales:    {}", stats.completed_cuts);
    println!("Barbero favorito:  {}", stats.favourite_barber.as_deref().unwrap_or("-"));
    println!("Sucursal habitual: {}", stats.usual_branch.as_deref().unwrap_or("-"));
    println!("Total invertido:   {}", money(stats.total_spent));

    let history = dashboard.history();
    println!("Historial ({}):", history.len());
    for row in &history {
        print_row(row);
    }
    Ok(())
}
