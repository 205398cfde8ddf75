//! barber-desk: terminal front-end for the barbershop booking backend

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use barber_desk::{logger, DeskConfig};

/// Booking, dashboards and back-office for the barbershop API
#[derive(Parser)]
#[command(name = "barber-desk")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "BARBER_API_URL")]
    api_url: Option<String>,

    /// Directory holding the session token
    #[arg(long, global = true, env = "BARBER_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Log level
    #[arg(long, global = true, env = "BARBER_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store a session token
    Login {
        #[arg(long)]
        token: String,

        /// Role used to pick the landing page (client, admin)
        #[arg(long, default_value = "client")]
        role: String,
    },

    /// Forget the session token
    Logout,

    /// Print the route table
    Routes,

    /// List branches
    Branches {
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// List services with active/inactive counts
    Services {
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// List staff
    Staff {
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Admin dashboard: appointments, status counts and day totals
    Appointments {
        /// Status filter (todos, pendiente, en curso, completado, cancelado)
        #[arg(long, default_value = "todos")]
        status: String,

        /// Search over client and barber names
        #[arg(short, long, default_value = "")]
        search: String,

        /// Day for revenue totals (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Client profile: next appointment, history and stats
    Client {
        /// Client display name
        #[arg(long, conflicts_with = "id")]
        name: Option<String>,

        /// Client id
        #[arg(long)]
        id: Option<i64>,
    },

    /// Bookable dates and slots for a barber (or "any")
    Slots {
        #[arg(long)]
        branch: i64,

        #[arg(long)]
        service: i64,

        #[arg(long, default_value = "any")]
        barber: String,

        /// YYYY-MM-DD; omit to list bookable dates
        #[arg(long)]
        date: Option<String>,
    },

    /// Book an appointment through the wizard
    Book {
        #[arg(long)]
        branch: i64,

        #[arg(long)]
        service: i64,

        #[arg(long, default_value = "any")]
        barber: String,

        /// YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// HH:MM
        #[arg(long)]
        time: String,

        #[arg(long)]
        client_id: Option<i64>,

        /// Submit without stopping at the summary
        #[arg(short, long)]
        yes: bool,
    },

    /// Create a service
    AddService {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "30")]
        duration: String,

        #[arg(long, default_value = "0")]
        price: String,
    },

    /// Register a barber
    AddStaff {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        specialty: String,

        #[arg(long)]
        branch: Option<i64>,
    },

    /// Edit a barber's weekly hours
    Schedule {
        #[arg(long)]
        barber: i64,

        #[arg(long)]
        branch: Option<i64>,

        /// Day to enable/disable (repeatable)
        #[arg(long)]
        toggle: Vec<String>,

        /// DAY=HH:MM-HH:MM (repeatable)
        #[arg(long)]
        set: Vec<String>,

        /// Copy this day's hours to every day but Sunday
        #[arg(long)]
        apply_all: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = DeskConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    config.validate()?;

    logger::init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    tracing::debug!(api_url = %config.api_url, "barber-desk starting");

    commands::run(cli.command, config).await
}
