//! Barber Model (usuario con rol barbero)

use serde::{Deserialize, Serialize};

use super::branch::default_true;
use super::schedule::WeeklySchedule;

/// Barber / staff entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barber {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    /// Branch reference
    #[serde(default, alias = "branch")]
    pub branch_id: Option<i64>,
    #[serde(default = "default_true", alias = "active")]
    pub is_active: bool,
    /// Working hours; the default week applies when absent
    #[serde(default)]
    pub schedule: Option<WeeklySchedule>,
}

impl Barber {
    /// Working hours, falling back to the default week
    pub fn working_hours(&self) -> WeeklySchedule {
        self.schedule.clone().unwrap_or_default()
    }

    pub fn works_at(&self, branch_id: i64) -> bool {
        self.branch_id == Some(branch_id)
    }
}

/// Create barber payload (`POST /usuarios`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarberCreate {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub branch_id: Option<i64>,
}
