//! Appointment Model (turno)

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Appointment status
///
/// Wire values follow the backend vocabulary; English names are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "pendiente", alias = "pending")]
    Pending,
    #[serde(rename = "en curso", alias = "in_progress")]
    InProgress,
    #[serde(rename = "completado", alias = "completed")]
    Completed,
    #[serde(rename = "cancelado", alias = "cancelled")]
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        Self::InProgress,
        Self::Pending,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Backend wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::InProgress => "en curso",
            Self::Completed => "completado",
            Self::Cancelled => "cancelado",
        }
    }

    /// Whether the appointment still occupies its slot
    pub fn is_blocking(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendiente" | "pending" => Ok(Self::Pending),
            "en curso" | "en_curso" | "in_progress" => Ok(Self::InProgress),
            "completado" | "completed" => Ok(Self::Completed),
            "cancelado" | "cancelled" => Ok(Self::Cancelled),
            other => Err(ModelError::InvalidStatus(other.to_string())),
        }
    }
}

/// Appointment entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    /// Client display name
    pub client: String,
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(alias = "barber")]
    pub barber_id: i64,
    #[serde(alias = "service")]
    pub service_id: i64,
    #[serde(alias = "branch")]
    pub branch_id: i64,
    /// Local shop time
    pub start: NaiveDateTime,
    #[serde(default)]
    pub status: AppointmentStatus,
    /// Charged price, when the backend denormalizes it
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl Appointment {
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// End of the appointment given its service duration
    pub fn end(&self, duration_minutes: u32) -> NaiveDateTime {
        self.start + TimeDelta::minutes(i64::from(duration_minutes))
    }
}

/// Create appointment payload (`POST /turnos`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub branch_id: i64,
    pub service_id: i64,
    pub barber_id: i64,
    pub start: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
}
