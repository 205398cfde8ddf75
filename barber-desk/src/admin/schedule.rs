//! Weekly working hours editor
//!
//! Edits the schedule of one barber at a time. Saving writes the schedule back
//! onto the barber record, which is where slot generation reads it from;
//! [`crate::storage::ScheduleFile`] keeps it between runs.

use chrono::Weekday;
use shared::models::{parse_hhmm, weekday_label, Barber, Branch, DaySchedule, WeeklySchedule};

use super::FormError;
use crate::catalog::Catalog;

/// Which end of a day's range is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeEdge {
    Start,
    End,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleEditor {
    barbers: Vec<Barber>,
    branches: Vec<Branch>,
    barber_id: Option<i64>,
    branch_id: Option<i64>,
    schedule: WeeklySchedule,
    saved: bool,
}

impl ScheduleEditor {
    /// Starts on the first barber and the first branch
    pub fn new(catalog: Catalog) -> Self {
        let barber_id = catalog.staff.first().map(|b| b.id);
        let branch_id = catalog.branches.first().map(|b| b.id);
        let schedule = catalog
            .staff
            .first()
            .map(Barber::working_hours)
            .unwrap_or_default();
        Self {
            barbers: catalog.staff,
            branches: catalog.branches,
            barber_id,
            branch_id,
            schedule,
            saved: false,
        }
    }

    pub fn barbers(&self) -> &[Barber] {
        &self.barbers
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn barber(&self) -> Option<&Barber> {
        self.barber_id
            .and_then(|id| self.barbers.iter().find(|b| b.id == id))
    }

    pub fn branch(&self) -> Option<&Branch> {
        self.branch_id
            .and_then(|id| self.branches.iter().find(|b| b.id == id))
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Switch barber, loading that barber's current hours
    pub fn select_barber(&mut self, id: i64) -> Result<(), FormError> {
        let barber = self
            .barbers
            .iter()
            .find(|b| b.id == id)
            .ok_or(FormError::NotFound(id))?;
        self.schedule = barber.working_hours();
        self.barber_id = Some(id);
        self.saved = false;
        Ok(())
    }

    pub fn select_branch(&mut self, id: i64) -> Result<(), FormError> {
        if !self.branches.iter().any(|b| b.id == id) {
            return Err(FormError::NotFound(id));
        }
        self.branch_id = Some(id);
        self.saved = false;
        Ok(())
    }

    /// Enable or disable a day, returning the new flag
    pub fn toggle(&mut self, day: Weekday) -> bool {
        let entry = self.schedule.day_mut(day);
        entry.enabled = !entry.enabled;
        self.saved = false;
        entry.enabled
    }

    /// Set one end of a day's range from an `HH:MM` string
    ///
    /// The range may be inverted while it is being edited; [`Self::save`]
    /// refuses it.
    pub fn update_time(&mut self, day: Weekday, edge: TimeEdge, value: &str) -> Result<(), FormError> {
        let time = parse_hhmm(value)?;
        let entry = self.schedule.day_mut(day);
        match edge {
            TimeEdge::Start => entry.start = time,
            TimeEdge::End => entry.end = time,
        }
        self.saved = false;
        Ok(())
    }

    /// Set both ends of a day's range at once
    pub fn set_hours(&mut self, day: Weekday, start: &str, end: &str) -> Result<(), FormError> {
        let (start, end) = (parse_hhmm(start)?, parse_hhmm(end)?);
        let candidate = DaySchedule {
            enabled: true,
            start,
            end,
        };
        candidate.validate()?;
        let entry = self.schedule.day_mut(day);
        entry.start = start;
        entry.end = end;
        self.saved = false;
        Ok(())
    }

    /// Copy `day`'s hours to every day except Sunday, keeping enabled flags
    pub fn apply_to_all(&mut self, day: Weekday) {
        let source = *self.schedule.day(day);
        for target in WeeklySchedule::WEEK {
            if target == Weekday::Sun {
                continue;
            }
            let entry = self.schedule.day_mut(target);
            entry.start = source.start;
            entry.end = source.end;
        }
        self.saved = false;
        tracing::debug!(from = weekday_label(day), "Hours applied to the week");
    }

    pub fn enabled_count(&self) -> usize {
        self.schedule.enabled_count()
    }

    /// Store the schedule on the selected barber and mark the form saved
    ///
    /// Fails when an enabled day does not end after it starts.
    pub fn save(&mut self) -> Result<&WeeklySchedule, FormError> {
        let id = self.barber_id.ok_or(FormError::NoForm)?;
        if let Err((day, e)) = self.schedule.validate() {
            tracing::warn!(barber_id = id, day = weekday_label(day), error = %e, "Schedule not saved");
            return Err(e.into());
        }
        let barber = self
            .barbers
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(FormError::NotFound(id))?;
        barber.schedule = Some(self.schedule.clone());
        self.saved = true;
        tracing::info!(
            barber_id = id,
            branch_id = ?self.branch_id,
            enabled_days = self.schedule.enabled_count(),
            "Schedule saved"
        );
        Ok(&self.schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use shared::ModelError;

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

    fn editor() -> ScheduleEditor {
        let branch = Branch {
            id: 1,
            name: "Centro".to_string(),
            address: String::new(),
            phone: None,
            is_active: true,
        };
        ScheduleEditor::new(Catalog::new(vec![branch], Vec::new(), vec![barber(1), barber(2)]))
    }

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn test_starts_with_default_week() {
        let editor = editor();
        assert_eq!(editor.barber().map(|b| b.id), Some(1));
        assert_eq!(editor.branch().map(|b| b.id), Some(1));
        assert_eq!(editor.enabled_count(), 6);
        assert!(!editor.is_saved());
    }

    #[test]
    fn test_edits_clear_saved_flag() {
        let mut editor = editor();
        editor.save().unwrap();
        assert!(editor.is_saved());

        assert!(editor.toggle(Weekday::Sun));
        assert!(!editor.is_saved());
        assert_eq!(editor.enabled_count(), 7);

        editor.save().unwrap();
        editor.update_time(Weekday::Mon, TimeEdge::End, "19:30").unwrap();
        assert!(!editor.is_saved());
        assert_eq!(editor.schedule().day(Weekday::Mon).end, t("19:30"));

        assert_eq!(
            editor.update_time(Weekday::Mon, TimeEdge::Start, "9am"),
            Err(FormError::Invalid(ModelError::InvalidTime("9am".to_string())))
        );
    }

    #[test]
    fn test_inverted_range_is_not_saved() {
        let mut editor = editor();
        editor.update_time(Weekday::Mon, TimeEdge::End, "08:00").unwrap();
        let inverted = ModelError::InvalidHours {
            start: "09:00".to_string(),
            end: "08:00".to_string(),
        };
        assert_eq!(editor.save().unwrap_err(), FormError::Invalid(inverted));
        assert!(!editor.is_saved());
        assert!(editor.barber().unwrap().schedule.is_none());

        // Turning the day off makes the week valid again
        editor.toggle(Weekday::Mon);
        assert!(editor.save().is_ok());

        assert_eq!(
            editor.set_hours(Weekday::Tue, "18:00", "18:00"),
            Err(FormError::Invalid(ModelError::InvalidHours {
                start: "18:00".to_string(),
                end: "18:00".to_string()
            }))
        );
        assert!(editor.is_saved());
        editor.set_hours(Weekday::Tue, "19:00", "22:00").unwrap();
        assert_eq!(editor.schedule().day(Weekday::Tue).start, t("19:00"));
        assert!(!editor.is_saved());
    }

    #[test]
    fn test_apply_to_all_skips_sunday() {
        let mut editor = editor();
        editor.update_time(Weekday::Sat, TimeEdge::Start, "08:00").unwrap();
        editor.update_time(Weekday::Sat, TimeEdge::End, "14:00").unwrap();
        editor.toggle(Weekday::Wed);
        editor.apply_to_all(Weekday::Sat);

        for day in WeeklySchedule::WEEK {
            let entry = editor.schedule().day(day);
            if day == Weekday::Sun {
                assert_eq!(*entry, DaySchedule::new(false, "10:00", "14:00").unwrap());
            } else {
                assert_eq!((entry.start, entry.end), (t("08:00"), t("14:00")));
            }
        }
        // Enabled flags are untouched
        assert!(!editor.schedule().is_working(Weekday::Wed));
    }

    #[test]
    fn test_save_stores_schedule_on_barber() {
        let mut editor = editor();
        editor.select_barber(2).unwrap();
        editor.toggle(Weekday::Sat);
        editor.save().unwrap();

        // Switching back and forth reloads the stored hours
        editor.select_barber(1).unwrap();
        assert!(editor.schedule().is_working(Weekday::Sat));
        editor.select_barber(2).unwrap();
        assert!(!editor.schedule().is_working(Weekday::Sat));

        assert_eq!(editor.select_barber(9), Err(FormError::NotFound(9)));
        assert_eq!(editor.select_branch(9), Err(FormError::NotFound(9)));

        assert!(editor.barbers()[0].schedule.is_none());
        assert_eq!(editor.barbers()[1].working_hours().enabled_count(), 5);
    }
}
