//! Desk configuration
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | BARBER_API_URL | http://localhost:8080 | Booking backend base URL |
//! | BARBER_DATA_DIR | ./data | Session token, role and saved schedules |
//! | BARBER_LOG_LEVEL | info | Log level (`RUST_LOG` wins) |
//! | BARBER_LOG_JSON | false | JSON console logs |
//! | BARBER_LOG_DIR | - | Daily rolling log files |
//! | BARBER_TIMEOUT_SECS | 30 | HTTP request timeout |
//! | BARBER_SLOT_MINUTES | 30 | Booking slot increment |
//! | BARBER_BOOKING_DAYS | 6 | Dates offered by the wizard |
//! | BARBER_SLOT_POLICY | exact | `exact` or `overlap` slot blocking |

use std::path::PathBuf;
use std::str::FromStr;

use barber_client::{ClientConfig, FileTokenStore};
use chrono::NaiveDate;

use crate::booking::{SlotPolicy, WizardConfig};
use crate::error::{DeskError, DeskResult};
use crate::storage::{RoleFile, ScheduleFile};

/// Token file inside the data directory
pub const TOKEN_FILE: &str = "session.json";

/// Role chosen at login
pub const ROLE_FILE: &str = "role.json";

/// Weekly hours saved from the schedule editor
pub const SCHEDULE_FILE: &str = "schedules.json";

const MAX_SLOT_MINUTES: u32 = 240;
const MAX_BOOKING_DAYS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<PathBuf>,
    pub timeout_secs: u64,
    pub slot_minutes: u32,
    pub booking_days: usize,
    pub slot_policy: SlotPolicy,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn parse_flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("1" | "true" | "TRUE" | "yes" | "on")
    )
}

impl DeskConfig {
    /// Read from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through `lookup`, falling back to defaults for missing or bad values
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup("BARBER_API_URL").unwrap_or_else(|| "http://localhost:8080".into()),
            data_dir: lookup("BARBER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data")),
            log_level: lookup("BARBER_LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: parse_flag(lookup("BARBER_LOG_JSON")),
            log_dir: lookup("BARBER_LOG_DIR")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
            timeout_secs: parse_or(lookup("BARBER_TIMEOUT_SECS"), 30),
            slot_minutes: parse_or(lookup("BARBER_SLOT_MINUTES"), 30),
            booking_days: parse_or(lookup("BARBER_BOOKING_DAYS"), 6),
            slot_policy: match lookup("BARBER_SLOT_POLICY").as_deref().map(str::trim) {
                Some("overlap") => SlotPolicy::Overlap,
                _ => SlotPolicy::ExactStart,
            },
        }
    }

    pub fn validate(&self) -> DeskResult<()> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(DeskError::Config(format!(
                "BARBER_API_URL must be an http(s) URL, got '{url}'"
            )));
        }
        if self.timeout_secs == 0 {
            return Err(DeskError::Config("BARBER_TIMEOUT_SECS must be positive".into()));
        }
        if !(1..=MAX_SLOT_MINUTES).contains(&self.slot_minutes) {
            return Err(DeskError::Config(format!(
                "BARBER_SLOT_MINUTES must be between 1 and {MAX_SLOT_MINUTES}"
            )));
        }
        if !(1..=MAX_BOOKING_DAYS).contains(&self.booking_days) {
            return Err(DeskError::Config(format!(
                "BARBER_BOOKING_DAYS must be between 1 and {MAX_BOOKING_DAYS}"
            )));
        }
        Ok(())
    }

    pub fn token_store(&self) -> FileTokenStore {
        FileTokenStore::new(self.data_dir.clone(), TOKEN_FILE)
    }

    pub fn role_file(&self) -> RoleFile {
        RoleFile::new(self.data_dir.clone(), ROLE_FILE)
    }

    pub fn schedule_file(&self) -> ScheduleFile {
        ScheduleFile::new(self.data_dir.clone(), SCHEDULE_FILE)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.trim()).with_timeout(self.timeout_secs)
    }

    pub fn wizard_config(&self, today: NaiveDate) -> WizardConfig {
        WizardConfig {
            today,
            booking_days: self.booking_days,
            slot_minutes: self.slot_minutes,
            policy: self.slot_policy,
        }
    }
}
