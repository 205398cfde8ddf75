//! Slot availability computed from already-fetched appointments
//!
//! The check is advisory: the backend stays the authority and rejects a
//! conflicting booking on submit.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use shared::models::{Appointment, Barber};

use crate::catalog::Catalog;

/// Default slot length in minutes
pub const DEFAULT_SLOT_MINUTES: u32 = 30;

/// How an existing appointment blocks a candidate slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotPolicy {
    /// Blocked only when an appointment starts at exactly the slot time
    #[default]
    ExactStart,
    /// Blocked when the slot's service window overlaps an appointment's window
    Overlap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotOptions {
    /// Increment between candidate slots, in minutes
    pub increment: u32,
    pub policy: SlotPolicy,
    /// Length of the service being booked, used by [`SlotPolicy::Overlap`]
    pub service_minutes: u32,
}

impl Default for SlotOptions {
    fn default() -> Self {
        Self {
            increment: DEFAULT_SLOT_MINUTES,
            policy: SlotPolicy::default(),
            service_minutes: DEFAULT_SLOT_MINUTES,
        }
    }
}

/// Bookable time offered in the date/time step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub time: NaiveTime,
    pub available: bool,
}

impl Slot {
    pub fn label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// Start times from `start` (inclusive) to `end` (exclusive) every `increment` minutes
pub fn candidate_times(start: NaiveTime, end: NaiveTime, increment: u32) -> Vec<NaiveTime> {
    let step = if increment == 0 { DEFAULT_SLOT_MINUTES } else { increment };
    let to_minutes = |t: NaiveTime| t.hour() * 60 + t.minute();
    let (first, last) = (to_minutes(start), to_minutes(end));

    (first..last)
        .step_by(step as usize)
        .filter_map(|m| NaiveTime::from_hms_opt(m / 60, m % 60, 0))
        .collect()
}

/// Whether `[start, start + minutes)` overlaps the appointment's window
fn overlaps(start: NaiveDateTime, minutes: u32, appointment: &Appointment, catalog: &Catalog) -> bool {
    let end = start + TimeDelta::minutes(i64::from(minutes));
    start < appointment.end(catalog.service_minutes(appointment.service_id)) && appointment.start < end
}

/// Whether `barber` is free at `start` given the fetched appointments
pub fn is_free(
    barber: &Barber,
    start: NaiveDateTime,
    appointments: &[Appointment],
    catalog: &Catalog,
    options: &SlotOptions,
) -> bool {
    !appointments
        .iter()
        .filter(|a| a.barber_id == barber.id && a.status.is_blocking())
        .any(|a| match options.policy {
            SlotPolicy::ExactStart => a.start == start,
            SlotPolicy::Overlap => overlaps(start, options.service_minutes, a, catalog),
        })
}

/// Slots of one barber on `date`; empty when the barber is off that day
pub fn barber_slots(
    barber: &Barber,
    date: NaiveDate,
    appointments: &[Appointment],
    catalog: &Catalog,
    options: &SlotOptions,
) -> Vec<Slot> {
    let week = barber.working_hours();
    let Some((start, end)) = week.day(date.weekday()).hours() else {
        return Vec::new();
    };

    candidate_times(start, end, options.increment)
        .into_iter()
        .map(|time| Slot {
            time,
            available: is_free(barber, date.and_time(time), appointments, catalog, options),
        })
        .collect()
}

/// Slots when any of `barbers` may take the booking
///
/// A time is offered when at least one barber works then, and is available
/// when at least one of those barbers is free.
pub fn any_barber_slots(
    barbers: &[&Barber],
    date: NaiveDate,
    appointments: &[Appointment],
    catalog: &Catalog,
    options: &SlotOptions,
) -> Vec<Slot> {
    let mut merged: BTreeMap<NaiveTime, bool> = BTreeMap::new();
    for barber in barbers {
        for slot in barber_slots(barber, date, appointments, catalog, options) {
            *merged.entry(slot.time).or_insert(false) |= slot.available;
        }
    }
    merged
        .into_iter()
        .map(|(time, available)| Slot { time, available })
        .collect()
}

/// First barber, in list order, who works and is free at `start`
pub fn first_free_barber<'a>(
    barbers: &[&'a Barber],
    start: NaiveDateTime,
    appointments: &[Appointment],
    catalog: &Catalog,
    options: &SlotOptions,
) -> Option<&'a Barber> {
    barbers.iter().copied().find(|barber| {
        barber_slots(barber, start.date(), appointments, catalog, options)
            .iter()
            .any(|slot| slot.available && slot.time == start.time())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{AppointmentStatus, Service};
    use shared::Decimal;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn barber(id: i64) -> Barber {
        Barber {
            id,
            name: format!("Barber {id}"),
            email: None,
            phone: None,
            specialty: None,
            branch_id: Some(1),
            is_active: true,
            schedule: None,
        }
    }

    fn appt(id: i64, barber_id: i64, start: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            client: "Cliente".to_string(),
            client_id: None,
            barber_id,
            service_id: 1,
            branch_id: 1,
            start: NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M").unwrap(),
            status,
            price: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            Vec::new(),
            vec![Service {
                id: 1,
                name: "Corte + Barba".to_string(),
                description: String::new(),
                duration: 60,
                price: Decimal::from(4500),
                is_active: true,
            }],
            Vec::new(),
        )
    }

    // 2026-02-23 is a Monday
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 23).unwrap()
    }

    #[test]
    fn test_candidate_times() {
        let times = candidate_times(t("09:00"), t("10:30"), 30);
        assert_eq!(times, vec![t("09:00"), t("09:30"), t("10:00")]);
        // Zero increment falls back to the default step
        assert_eq!(candidate_times(t("09:00"), t("10:00"), 0).len(), 2);
        assert!(candidate_times(t("18:00"), t("09:00"), 30).is_empty());
        assert_eq!(candidate_times(t("23:00"), t("23:59"), 30).len(), 2);
    }

    #[test]
    fn test_exact_start_blocks_only_matching_slot() {
        let b = barber(1);
        let appointments = vec![
            appt(1, 1, "2026-02-23 10:00", AppointmentStatus::Pending),
            appt(2, 1, "2026-02-24 11:00", AppointmentStatus::Pending),
            appt(3, 2, "2026-02-23 11:00", AppointmentStatus::Pending),
        ];
        let slots = barber_slots(&b, monday(), &appointments, &catalog(), &SlotOptions::default());

        // Monday 09:00-18:00 every 30 minutes
        assert_eq!(slots.len(), 18);
        assert_eq!(slots.first().unwrap().time, t("09:00"));
        assert_eq!(slots.last().unwrap().time, t("17:30"));

        let unavailable: Vec<_> = slots.iter().filter(|s| !s.available).map(Slot::label).collect();
        assert_eq!(unavailable, vec!["10:00"]);
    }

    #[test]
    fn test_available_slots_never_match_existing_starts() {
        let b = barber(1);
        let appointments: Vec<_> = ["09:00", "09:30", "12:00", "17:30"]
            .iter()
            .enumerate()
            .map(|(i, time)| {
                appt(i as i64, 1, &format!("2026-02-23 {time}"), AppointmentStatus::Pending)
            })
            .collect();

        for slot in barber_slots(&b, monday(), &appointments, &catalog(), &SlotOptions::default()) {
            if slot.available {
                let start = monday().and_time(slot.time);
                assert!(appointments.iter().all(|a| a.start != start));
            }
        }
    }

    #[test]
    fn test_cancelled_appointments_do_not_block() {
        let b = barber(1);
        let appointments = vec![appt(1, 1, "2026-02-23 10:00", AppointmentStatus::Cancelled)];
        let slots = barber_slots(&b, monday(), &appointments, &catalog(), &SlotOptions::default());
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn test_overlap_policy_blocks_service_window() {
        let b = barber(1);
        // 60 minute service starting 10:00 occupies 10:00-11:00
        let appointments = vec![appt(1, 1, "2026-02-23 10:00", AppointmentStatus::Pending)];
        let options = SlotOptions {
            policy: SlotPolicy::Overlap,
            service_minutes: 30,
            ..SlotOptions::default()
        };
        let slots = barber_slots(&b, monday(), &appointments, &catalog(), &options);
        let unavailable: Vec<_> = slots.iter().filter(|s| !s.available).map(Slot::label).collect();
        assert_eq!(unavailable, vec!["10:00", "10:30"]);
    }

    #[test]
    fn test_day_off_has_no_slots() {
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let slots = barber_slots(&barber(1), sunday, &[], &catalog(), &SlotOptions::default());
        assert!(slots.is_empty());
    }

    #[test]
    fn test_any_barber_merges_availability() {
        let (b1, b2) = (barber(1), barber(2));
        let appointments = vec![
            appt(1, 1, "2026-02-23 10:00", AppointmentStatus::Pending),
            appt(2, 2, "2026-02-23 10:00", AppointmentStatus::Pending),
            appt(3, 1, "2026-02-23 11:00", AppointmentStatus::Pending),
        ];
        let barbers = vec![&b1, &b2];
        let options = SlotOptions::default();
        let slots = any_barber_slots(&barbers, monday(), &appointments, &catalog(), &options);

        let at = |time: &str| slots.iter().find(|s| s.time == t(time)).unwrap().available;
        assert!(!at("10:00"));
        assert!(at("11:00"));

        let start = monday().and_time(t("11:00"));
        let chosen = first_free_barber(&barbers, start, &appointments, &catalog(), &options);
        assert_eq!(chosen.map(|b| b.id), Some(2));

        let start = monday().and_time(t("10:00"));
        assert!(first_free_barber(&barbers, start, &appointments, &catalog(), &options).is_none());
    }
}
