//! Weekly working hours (horarios)

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Parse an `HH:MM` time string
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, ModelError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ModelError::InvalidTime(value.to_string()))
}

/// Serde adapter for `HH:MM` times
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_hhmm(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse a weekday from its Spanish or English name
pub fn parse_weekday(value: &str) -> Result<Weekday, ModelError> {
    let day = match value.trim().to_lowercase().as_str() {
        "lunes" | "lun" | "monday" | "mon" => Weekday::Mon,
        "martes" | "mar" | "tuesday" | "tue" => Weekday::Tue,
        "miércoles" | "miercoles" | "mié" | "mie" | "wednesday" | "wed" => Weekday::Wed,
        "jueves" | "jue" | "thursday" | "thu" => Weekday::Thu,
        "viernes" | "vie" | "friday" | "fri" => Weekday::Fri,
        "sábado" | "sabado" | "sáb" | "sab" | "saturday" | "sat" => Weekday::Sat,
        "domingo" | "dom" | "sunday" | "sun" => Weekday::Sun,
        other => return Err(ModelError::InvalidWeekday(other.to_string())),
    };
    Ok(day)
}

/// Spanish day label
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miércoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Abbreviated Spanish day label
pub fn weekday_abbr(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Lun",
        Weekday::Tue => "Mar",
        Weekday::Wed => "Mié",
        Weekday::Thu => "Jue",
        Weekday::Fri => "Vie",
        Weekday::Sat => "Sáb",
        Weekday::Sun => "Dom",
    }
}

/// Working hours of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub enabled: bool,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl DaySchedule {
    pub fn new(enabled: bool, start: &str, end: &str) -> Result<Self, ModelError> {
        let start = parse_hhmm(start)?;
        let end = parse_hhmm(end)?;
        if end <= start {
            return Err(ModelError::InvalidHours {
                start: start.format("%H:%M").to_string(),
                end: end.format("%H:%M").to_string(),
            });
        }
        Ok(Self { enabled, start, end })
    }

    /// Working range, `None` when the day is off
    pub fn hours(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.enabled.then_some((self.start, self.end))
    }

    /// An enabled day must end after it starts
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.enabled && self.end <= self.start {
            return Err(ModelError::InvalidHours {
                start: self.start.format("%H:%M").to_string(),
                end: self.end.format("%H:%M").to_string(),
            });
        }
        Ok(())
    }
}

/// Monday-first weekly schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub days: [DaySchedule; 7],
}

impl WeeklySchedule {
    pub const WEEK: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn day(&self, day: Weekday) -> &DaySchedule {
        &self.days[day.num_days_from_monday() as usize]
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut DaySchedule {
        &mut self.days[day.num_days_from_monday() as usize]
    }

    pub fn is_working(&self, day: Weekday) -> bool {
        self.day(day).enabled
    }

    /// Number of enabled days
    pub fn enabled_count(&self) -> usize {
        self.days.iter().filter(|d| d.enabled).count()
    }

    /// First enabled day whose range is empty or inverted
    pub fn validate(&self) -> Result<(), (Weekday, ModelError)> {
        for day in Self::WEEK {
            self.day(day).validate().map_err(|e| (day, e))?;
        }
        Ok(())
    }
}

impl Default for WeeklySchedule {
    /// Mon-Thu 09-18, Fri 09-20, Sat 10-18, Sunday off
    fn default() -> Self {
        let t = |h: u32| NaiveTime::from_hms_opt(h, 0, 0).unwrap_or(NaiveTime::MIN);
        let day = |enabled, start, end| DaySchedule {
            enabled,
            start: t(start),
            end: t(end),
        };
        Self {
            days: [
                day(true, 9, 18),
                day(true, 9, 18),
                day(true, 9, 18),
                day(true, 9, 18),
                day(true, 9, 20),
                day(true, 10, 18),
                day(false, 10, 14),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_week() {
        let week = WeeklySchedule::default();
        assert_eq!(week.enabled_count(), 6);
        assert!(!week.is_working(Weekday::Sun));
        assert_eq!(week.day(Weekday::Fri).end, parse_hhmm("20:00").unwrap());
        assert_eq!(week.day(Weekday::Sat).start, parse_hhmm("10:00").unwrap());
    }

    #[test]
    fn test_day_schedule_rejects_inverted_hours() {
        assert!(DaySchedule::new(true, "18:00", "09:00").is_err());
        assert!(DaySchedule::new(true, "9h", "18:00").is_err());
        assert!(DaySchedule::new(true, "09:00", "18:00").is_ok());
    }

    #[test]
    fn test_week_validation_skips_days_off() {
        let mut week = WeeklySchedule::default();
        assert!(week.validate().is_ok());

        // Sunday is off, so an inverted range there is ignored
        week.day_mut(Weekday::Sun).end = parse_hhmm("08:00").unwrap();
        assert!(week.validate().is_ok());

        week.day_mut(Weekday::Tue).end = parse_hhmm("09:00").unwrap();
        let (day, err) = week.validate().unwrap_err();
        assert_eq!(day, Weekday::Tue);
        assert_eq!(
            err,
            ModelError::InvalidHours {
                start: "09:00".to_string(),
                end: "09:00".to_string()
            }
        );
    }

    #[test]
    fn test_schedule_serializes_hhmm() {
        let day = DaySchedule::new(true, "09:30", "18:00").unwrap();
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, r#"{"enabled":true,"start":"09:30","end":"18:00"}"#);
        let back: DaySchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day);
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("Miércoles").unwrap(), Weekday::Wed);
        assert_eq!(parse_weekday("sat").unwrap(), Weekday::Sat);
        assert!(parse_weekday("someday").is_err());
        assert_eq!(weekday_abbr(Weekday::Sat), "Sáb");
    }
}
