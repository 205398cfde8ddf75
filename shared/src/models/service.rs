//! Service Model (servicio)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::branch::default_true;

/// Duration used when none is given
pub const DEFAULT_SERVICE_MINUTES: u32 = 30;

/// Service entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Duration in minutes
    #[serde(default = "default_duration")]
    pub duration: u32,
    pub price: Decimal,
    #[serde(default = "default_true", alias = "active")]
    pub is_active: bool,
}

impl Service {
    /// Label shown in summaries, e.g. `Fade Premium · 45 min`
    pub fn label(&self) -> String {
        format!("{} · {} min", self.name, self.duration)
    }
}

/// Create service payload (`POST /servicios`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCreate {
    pub name: String,
    pub description: String,
    pub duration: u32,
    pub price: Decimal,
    pub is_active: bool,
}

fn default_duration() -> u32 {
    DEFAULT_SERVICE_MINUTES
}
