//! Conflict detection for candidate bookings.
//!
//! Compares a candidate interval against a resource's committed appointments
//! and the company's scheduling settings. All applicable conflicts are
//! returned, not just the first; an empty list means the candidate is
//! schedulable.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::appointment::Appointment;
use crate::error::ScheduleResult;
use crate::settings::SchedulingSettings;
use crate::time_math::Interval;

/// The kind of scheduling conflict detected.
///
/// Wire code: 0=Overlap, 1=BufferViolation, 2=OutsideWorkingHours, 3=Holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ConflictKind {
    Overlap,
    BufferViolation,
    OutsideWorkingHours,
    Holiday,
}

impl ConflictKind {
    pub fn code(&self) -> u8 {
        match self {
            ConflictKind::Overlap => 0,
            ConflictKind::BufferViolation => 1,
            ConflictKind::OutsideWorkingHours => 2,
            ConflictKind::Holiday => 3,
        }
    }
}

impl From<ConflictKind> for u8 {
    fn from(k: ConflictKind) -> u8 {
        k.code()
    }
}

impl TryFrom<u8> for ConflictKind {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ConflictKind::Overlap),
            1 => Ok(ConflictKind::BufferViolation),
            2 => Ok(ConflictKind::OutsideWorkingHours),
            3 => Ok(ConflictKind::Holiday),
            other => Err(format!("Unknown conflict kind code: {other}")),
        }
    }
}

/// A detected conflict for a candidate booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub message: String,
    pub conflicting_appointment_id: Option<Uuid>,
    pub date: NaiveDate,
    pub interval: Interval,
}

/// Find all conflicts for `candidate` against a resource's committed
/// appointments under the company's scheduling settings.
///
/// `existing` may be the company's full committed list; records for other
/// resources, cancelled appointments, and appointments whose interval cannot
/// be ordered are skipped (the latter logged as a data-quality issue). A
/// malformed candidate is the subject of the call and fails with
/// `MalformedInterval`.
///
/// Checks, in precedence order: Holiday, OutsideWorkingHours, then per
/// appointment Overlap, then BufferViolation for non-overlapping neighbors
/// closer than `buffer_minutes` (only when `allow_overlapping` is false;
/// back-to-back counts as a zero-minute gap).
pub fn find_conflicts(
    candidate_start: DateTime<Utc>,
    candidate_end: DateTime<Utc>,
    resource_id: Uuid,
    existing: &[Appointment],
    settings: &SchedulingSettings,
) -> ScheduleResult<Vec<Conflict>> {
    let candidate = Interval::new(candidate_start, candidate_end)?;
    let date = candidate.start.date_naive();

    let mut conflicts = Vec::new();

    if settings.is_holiday(date) {
        conflicts.push(Conflict {
            kind: ConflictKind::Holiday,
            message: format!("{} is a holiday", date),
            conflicting_appointment_id: None,
            date,
            interval: candidate,
        });
    }

    if !settings.is_working_day(date) {
        conflicts.push(Conflict {
            kind: ConflictKind::OutsideWorkingHours,
            message: format!(
                "{} ({}) is not a working day",
                date,
                date.weekday()
            ),
            conflicting_appointment_id: None,
            date,
            interval: candidate,
        });
    } else if !within_working_hours(&candidate, settings) {
        conflicts.push(Conflict {
            kind: ConflictKind::OutsideWorkingHours,
            message: format!(
                "{}-{} is outside working hours {}-{}",
                candidate.start.time(),
                candidate.end.time(),
                settings.default_start_time,
                settings.default_end_time
            ),
            conflicting_appointment_id: None,
            date,
            interval: candidate,
        });
    }

    for appointment in existing {
        if !appointment.belongs_to(resource_id) || appointment.is_cancelled() {
            continue;
        }
        if !appointment.has_valid_interval() {
            warn!(
                appointment_id = %appointment.id,
                start = %appointment.start,
                end = %appointment.end,
                "Skipping appointment with unorderable interval"
            );
            continue;
        }

        let other = Interval {
            start: appointment.start,
            end: appointment.end,
        };

        if candidate.overlaps(&other) {
            conflicts.push(Conflict {
                kind: ConflictKind::Overlap,
                message: format!(
                    "Overlaps appointment {} ({} - {}) for resource {}",
                    appointment.id, appointment.start, appointment.end, resource_id
                ),
                conflicting_appointment_id: Some(appointment.id),
                date,
                interval: candidate,
            });
        } else if !settings.allow_overlapping && settings.buffer_minutes > 0 {
            // gap_minutes is Some for any non-overlapping pair (0 when back-to-back).
            if let Some(gap) = candidate.gap_minutes(&other) {
                if gap < settings.buffer_minutes {
                    conflicts.push(Conflict {
                        kind: ConflictKind::BufferViolation,
                        message: format!(
                            "Only {} minutes from appointment {}, {} required",
                            gap, appointment.id, settings.buffer_minutes
                        ),
                        conflicting_appointment_id: Some(appointment.id),
                        date,
                        interval: candidate,
                    });
                }
            }
        }
    }

    Ok(conflicts)
}

/// Whether the candidate's time-of-day span is fully inside working hours.
///
/// A candidate running past midnight can never fit inside a single working
/// day, so it is out of hours by construction.
fn within_working_hours(candidate: &Interval, settings: &SchedulingSettings) -> bool {
    if candidate.start.date_naive() != candidate.end.date_naive() {
        return false;
    }
    candidate.start.time() >= settings.default_start_time
        && candidate.end.time() <= settings.default_end_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::AppointmentStatus;
    use chrono::TimeZone;

    fn t(h: u32, m: u32) -> DateTime<Utc> {
        // 2025-03-20 is a Thursday.
        Utc.with_ymd_and_hms(2025, 3, 20, h, m, 0).unwrap()
    }

    fn appt(start: DateTime<Utc>, end: DateTime<Utc>, resource: Uuid) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            start,
            end,
            professional_id: Some(resource),
            team_id: None,
            company_id: Uuid::new_v4(),
            status: AppointmentStatus::Scheduled,
        }
    }

    fn strict_settings() -> SchedulingSettings {
        SchedulingSettings {
            buffer_minutes: 15,
            allow_overlapping: false,
            ..SchedulingSettings::default()
        }
    }

    #[test]
    fn test_back_to_back_is_buffer_violation_not_overlap() {
        let resource = Uuid::new_v4();
        let existing = vec![appt(t(10, 0), t(11, 0), resource)];

        let conflicts =
            find_conflicts(t(9, 0), t(10, 0), resource, &existing, &strict_settings()).unwrap();

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::BufferViolation);
        assert_eq!(
            conflicts[0].conflicting_appointment_id,
            Some(existing[0].id)
        );
    }

    #[test]
    fn test_overlap_takes_precedence_over_buffer_for_same_pair() {
        let resource = Uuid::new_v4();
        let existing = vec![appt(t(10, 0), t(11, 0), resource)];

        let conflicts =
            find_conflicts(t(9, 0), t(10, 30), resource, &existing, &strict_settings()).unwrap();

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Overlap);
    }

    #[test]
    fn test_allow_overlapping_suppresses_buffer_but_not_overlap() {
        let resource = Uuid::new_v4();
        let existing = vec![
            appt(t(10, 0), t(11, 0), resource),
            appt(t(9, 30), t(9, 45), resource),
        ];
        let mut settings = strict_settings();
        settings.allow_overlapping = true;

        let conflicts =
            find_conflicts(t(9, 0), t(10, 0), resource, &existing, &settings).unwrap();

        // Back-to-back neighbor is fine now; the double booking still shows.
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Overlap);
        assert_eq!(
            conflicts[0].conflicting_appointment_id,
            Some(existing[1].id)
        );
    }

    #[test]
    fn test_holiday_and_working_hours_conflicts() {
        let resource = Uuid::new_v4();
        let mut settings = strict_settings();
        settings
            .holidays
            .insert(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());

        let conflicts = find_conflicts(t(9, 0), t(10, 0), resource, &[], &settings).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Holiday);

        // 07:00 start is before the 08:00 working-day start.
        let conflicts =
            find_conflicts(t(7, 0), t(8, 30), resource, &[], &strict_settings()).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::OutsideWorkingHours);
    }

    #[test]
    fn test_non_working_day_is_flagged() {
        let resource = Uuid::new_v4();
        // 2025-03-22 is a Saturday.
        let start = Utc.with_ymd_and_hms(2025, 3, 22, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 22, 10, 0, 0).unwrap();

        let conflicts =
            find_conflicts(start, end, resource, &[], &strict_settings()).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::OutsideWorkingHours);
    }

    #[test]
    fn test_all_applicable_conflicts_are_returned() {
        let resource = Uuid::new_v4();
        let mut settings = strict_settings();
        settings
            .holidays
            .insert(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        let existing = vec![appt(t(9, 30), t(10, 30), resource)];

        let conflicts =
            find_conflicts(t(7, 0), t(10, 0), resource, &existing, &settings).unwrap();

        let kinds: Vec<_> = conflicts.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ConflictKind::Holiday,
                ConflictKind::OutsideWorkingHours,
                ConflictKind::Overlap,
            ]
        );
    }

    #[test]
    fn test_cancelled_and_malformed_appointments_are_skipped() {
        let resource = Uuid::new_v4();
        let mut cancelled = appt(t(9, 0), t(10, 0), resource);
        cancelled.status = AppointmentStatus::Cancelled;
        // end before start: unorderable, skipped with a warning.
        let malformed = appt(t(10, 0), t(9, 30), resource);

        let conflicts = find_conflicts(
            t(9, 0),
            t(10, 0),
            resource,
            &[cancelled, malformed],
            &strict_settings(),
        )
        .unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_other_resources_appointments_do_not_conflict() {
        let resource = Uuid::new_v4();
        // Same time, different professional: no conflict for this resource.
        let other = appt(t(9, 30), t(10, 30), Uuid::new_v4());

        let conflicts =
            find_conflicts(t(9, 0), t(10, 0), resource, &[other], &strict_settings()).unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_team_appointments_count_for_the_team_resource() {
        let team = Uuid::new_v4();
        let mut shared = appt(t(9, 30), t(10, 30), Uuid::new_v4());
        shared.professional_id = None;
        shared.team_id = Some(team);

        let conflicts =
            find_conflicts(t(9, 0), t(10, 0), team, &[shared], &strict_settings()).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Overlap);
    }

    #[test]
    fn test_malformed_candidate_is_fatal() {
        let resource = Uuid::new_v4();
        let result = find_conflicts(t(10, 0), t(9, 0), resource, &[], &strict_settings());
        assert!(result.is_err());
    }

    #[test]
    fn test_clear_candidate_is_schedulable() {
        let resource = Uuid::new_v4();
        let existing = vec![appt(t(13, 0), t(14, 0), resource)];
        let conflicts =
            find_conflicts(t(9, 0), t(10, 0), resource, &existing, &strict_settings()).unwrap();
        assert!(conflicts.is_empty());
    }
}
