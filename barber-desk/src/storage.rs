//! Desk state kept between runs under the data directory
//!
//! The backend has no endpoint for weekly hours or for the session role, so
//! both live in small JSON files next to the session token.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::models::WeeklySchedule;

use crate::routes::Role;

/// One JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        Self {
            path: base_path.into().join(filename),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed contents; a missing or unreadable file reads as `None`
    pub fn load<T: DeserializeOwned>(&self) -> Option<T> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable file");
                None
            }
        }
    }

    pub fn save<T: Serialize>(&self, value: &T) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&self.path, json)
    }

    pub fn clear(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSchedules {
    #[serde(default)]
    barbers: BTreeMap<i64, WeeklySchedule>,
}

/// Saved weekly hours, keyed by barber id
#[derive(Debug, Clone)]
pub struct ScheduleFile {
    file: JsonFile,
}

impl ScheduleFile {
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        Self {
            file: JsonFile::new(base_path, filename),
        }
    }

    pub fn load(&self) -> BTreeMap<i64, WeeklySchedule> {
        self.file
            .load::<StoredSchedules>()
            .map(|s| s.barbers)
            .unwrap_or_default()
    }

    /// Store `schedule` for `barber_id`, keeping the other barbers' weeks
    pub fn save(&self, barber_id: i64, schedule: &WeeklySchedule) -> std::io::Result<()> {
        let mut stored = self.file.load::<StoredSchedules>().unwrap_or_default();
        stored.barbers.insert(barber_id, schedule.clone());
        self.file.save(&stored)?;
        tracing::debug!(barber_id, path = %self.file.path().display(), "Schedule written");
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredRole {
    role: Role,
}

/// Role chosen at login
#[derive(Debug, Clone)]
pub struct RoleFile {
    file: JsonFile,
}

impl RoleFile {
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        Self {
            file: JsonFile::new(base_path, filename),
        }
    }

    pub fn load(&self) -> Option<Role> {
        self.file.load::<StoredRole>().map(|s| s.role)
    }

    pub fn save(&self, role: Role) -> std::io::Result<()> {
        self.file.save(&StoredRole { role })
    }

    pub fn clear(&self) -> std::io::Result<()> {
        self.file.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BarberChoice, BookingWizard, WizardConfig};
    use crate::catalog::Catalog;
    use chrono::{NaiveDate, Weekday};
    use shared::models::{Barber, Branch, Service};
    use shared::Decimal;
    use tempfile::TempDir;

    fn barber(id: i64) -> Barber {
        Barber {
            id,
            name: format!("Barbero {id}"),
            email: None,
            phone: None,
            specialty: None,
            branch_id: Some(1),
            is_active: true,
            schedule: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![Branch {
                id: 1,
                name: "Centro".to_string(),
                address: "Av. Corrientes 1234".to_string(),
                phone: None,
                is_active: true,
            }],
            vec![Service {
                id: 1,
                name: "Corte Clásico".to_string(),
                description: String::new(),
                duration: 30,
                price: Decimal::from(2500),
                is_active: true,
            }],
            vec![barber(1), barber(2)],
        )
    }

    /// Wizard on the date/time step for `barber_id`, Monday selected
    fn monday_slots(catalog: Catalog, barber_id: i64) -> usize {
        // 2026-02-22 is a Sunday, so the first date offered is Monday
        let today = NaiveDate::from_ymd_opt(2026, 2, 22).unwrap();
        let mut wizard = BookingWizard::new(catalog, Vec::new(), WizardConfig::starting(today));
        wizard.select_branch(1).unwrap();
        wizard.next().unwrap();
        wizard.select_service(1).unwrap();
        wizard.next().unwrap();
        wizard.select_barber(BarberChoice::Barber(barber_id)).unwrap();
        wizard.next().unwrap();
        wizard.select_date(0).unwrap();
        wizard.slots().len()
    }

    #[test]
    fn test_saved_day_off_removes_wizard_slots() {
        let dir = TempDir::new().unwrap();
        let mut week = WeeklySchedule::default();
        week.day_mut(Weekday::Mon).enabled = false;
        ScheduleFile::new(dir.path(), "schedules.json").save(1, &week).unwrap();

        // A later run reads the week back from disk
        let saved = ScheduleFile::new(dir.path(), "schedules.json").load();
        let catalog = catalog().with_schedules(&saved);

        assert_eq!(monday_slots(catalog.clone(), 1), 0);
        // 09:00 to 18:00 every 30 minutes for the barber without a saved week
        assert_eq!(monday_slots(catalog, 2), 18);
    }

    #[test]
    fn test_schedule_file_keeps_other_barbers() {
        let dir = TempDir::new().unwrap();
        let file = ScheduleFile::new(dir.path(), "schedules.json");
        assert!(file.load().is_empty());

        let mut week = WeeklySchedule::default();
        file.save(1, &week).unwrap();
        week.day_mut(Weekday::Sun).enabled = true;
        file.save(2, &week).unwrap();

        let saved = file.load();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[&1].enabled_count(), 6);
        assert_eq!(saved[&2].enabled_count(), 7);
    }

    #[test]
    fn test_role_file() {
        let dir = TempDir::new().unwrap();
        let file = RoleFile::new(dir.path(), "role.json");
        assert_eq!(file.load(), None);

        file.save(Role::Client).unwrap();
        assert_eq!(file.load(), Some(Role::Client));
        let json = std::fs::read_to_string(dir.path().join("role.json")).unwrap();
        assert!(json.contains("\"client\""));

        file.clear().unwrap();
        assert_eq!(file.load(), None);
        // Clearing twice is fine
        file.clear().unwrap();
    }

    #[test]
    fn test_unreadable_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("schedules.json"), "not json").unwrap();
        assert!(ScheduleFile::new(dir.path(), "schedules.json").load().is_empty());
    }
}
