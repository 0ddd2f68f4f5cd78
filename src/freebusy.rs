//! Free-slot computation for a resource's day.
//!
//! Merges a resource's busy intervals and walks the gaps between them inside
//! the company's working hours. Backs the facade's availability lookups.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::appointment::Appointment;
use crate::settings::SchedulingSettings;
use crate::time_math::Interval;

/// A free time slot on a resource's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

/// Merge overlapping or adjacent busy intervals, clipped to the window.
///
/// Returns a sorted, non-overlapping interval list.
fn merge_busy_intervals(
    appointments: &[Appointment],
    window: Interval,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let mut intervals: Vec<(DateTime<Utc>, DateTime<Utc>)> = appointments
        .iter()
        .filter(|a| !a.is_cancelled() && a.has_valid_interval())
        .filter(|a| a.start < window.end && a.end > window.start)
        .map(|a| (a.start.max(window.start), a.end.min(window.end)))
        .collect();

    if intervals.is_empty() {
        return Vec::new();
    }

    intervals.sort_by_key(|&(start, end)| (start, end));

    let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

/// Find the free slots within working hours on `date`, given the resource's
/// committed appointments.
///
/// Holidays and non-working days have no free slots. Cancelled and malformed
/// appointments are ignored.
pub fn find_free_slots(
    date: NaiveDate,
    appointments: &[Appointment],
    settings: &SchedulingSettings,
) -> Vec<FreeSlot> {
    if settings.is_holiday(date) || !settings.is_working_day(date) {
        return Vec::new();
    }
    if settings.default_end_time <= settings.default_start_time {
        return Vec::new();
    }

    let window = Interval {
        start: date.and_time(settings.default_start_time).and_utc(),
        end: date.and_time(settings.default_end_time).and_utc(),
    };

    let merged = merge_busy_intervals(appointments, window);

    let mut slots = Vec::new();
    let mut cursor = window.start;

    for (busy_start, busy_end) in &merged {
        if cursor < *busy_start {
            slots.push(FreeSlot {
                start: cursor,
                end: *busy_start,
                duration_minutes: (*busy_start - cursor).num_minutes(),
            });
        }
        cursor = cursor.max(*busy_end);
    }

    if cursor < window.end {
        slots.push(FreeSlot {
            start: cursor,
            end: window.end,
            duration_minutes: (window.end - cursor).num_minutes(),
        });
    }

    slots
}

/// First free slot on `date` of at least `min_duration_minutes`.
pub fn find_first_free_slot(
    date: NaiveDate,
    appointments: &[Appointment],
    settings: &SchedulingSettings,
    min_duration_minutes: i64,
) -> Option<FreeSlot> {
    find_free_slots(date, appointments, settings)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::AppointmentStatus;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn appt(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            start: Utc.with_ymd_and_hms(2025, 3, 20, start_h, start_m, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 3, 20, end_h, end_m, 0).unwrap(),
            professional_id: Some(Uuid::new_v4()),
            team_id: None,
            company_id: Uuid::new_v4(),
            status: AppointmentStatus::Scheduled,
        }
    }

    fn thursday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
    }

    #[test]
    fn test_free_slots_between_appointments() {
        // Working day 08:00-18:00, busy 09:00-10:00 and 13:00-14:30.
        let appointments = vec![appt(9, 0, 10, 0), appt(13, 0, 14, 30)];
        let slots = find_free_slots(thursday(), &appointments, &SchedulingSettings::default());

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].duration_minutes, 60); // 08:00-09:00
        assert_eq!(slots[1].duration_minutes, 180); // 10:00-13:00
        assert_eq!(slots[2].duration_minutes, 210); // 14:30-18:00
    }

    #[test]
    fn test_overlapping_busy_intervals_are_merged() {
        let appointments = vec![appt(9, 0, 11, 0), appt(10, 0, 12, 0)];
        let slots = find_free_slots(thursday(), &appointments, &SchedulingSettings::default());

        assert_eq!(slots.len(), 2);
        assert_eq!(
            slots[0].end,
            Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap()
        );
        assert_eq!(
            slots[1].start,
            Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_holiday_has_no_free_slots() {
        let mut settings = SchedulingSettings::default();
        settings.holidays.insert(thursday());
        assert!(find_free_slots(thursday(), &[], &settings).is_empty());
    }

    #[test]
    fn test_first_free_slot_honors_minimum_duration() {
        // Busy 08:30-17:30 leaves two 30-minute edges.
        let appointments = vec![appt(8, 30, 17, 30)];
        let settings = SchedulingSettings::default();

        let short = find_first_free_slot(thursday(), &appointments, &settings, 30).unwrap();
        assert_eq!(short.duration_minutes, 30);
        assert!(find_first_free_slot(thursday(), &appointments, &settings, 60).is_none());
    }

    #[test]
    fn test_fully_free_day_is_one_slot() {
        let slots = find_free_slots(thursday(), &[], &SchedulingSettings::default());
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].duration_minutes, 600);
    }
}
