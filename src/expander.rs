//! Recurrence expansion.
//!
//! Expands a `RecurrenceRule` into concrete occurrence intervals within a
//! query window. Every call recomputes from scratch over its immutable inputs;
//! the expander holds no state between calls.
//!
//! Biweekly rules repeat every other matching week counted from `start_date`:
//! only dates an exact multiple of 14 days from the rule's first matching
//! weekday are occurrences, never every occurrence of that weekday.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::appointment::{Appointment, AppointmentStatus};
use crate::constants::{
    EXECUTION_SEARCH_CAP_DAYS, EXECUTION_SEARCH_DAYS, MAX_OCCURRENCES_PER_WINDOW,
};
use crate::error::{ScheduleError, ScheduleResult};
use crate::rule::{Frequency, RecurrenceRule};
use crate::time_math::{clamped_date, shift_months, Interval};

/// One concrete time interval generated from a recurrence rule.
///
/// `sequence_index` is the ordinal of this occurrence counted from the rule's
/// first occurrence on/after `start_date` (index 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub rule_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub sequence_index: u32,
}

impl Occurrence {
    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }

    /// Materialize this occurrence as a synthetic committed appointment.
    ///
    /// The id is derived deterministically from the rule id and the sequence
    /// index, so repeated materialization of the same occurrence agrees.
    pub fn materialize(&self, rule: &RecurrenceRule) -> Appointment {
        Appointment {
            id: Uuid::new_v5(&rule.id, &self.sequence_index.to_be_bytes()),
            start: self.start,
            end: self.end,
            professional_id: None,
            team_id: rule.team_id,
            company_id: rule.company_id,
            status: AppointmentStatus::Scheduled,
        }
    }
}

/// Expand `rule` into the occurrences intersecting `[window_start, window_end)`.
///
/// An occurrence is included when `start < window_end && end > window_start`,
/// so an occurrence partially overlapping a window boundary passes through.
/// Non-active rules and windows outside the rule's date bounds yield an empty
/// list. More than `MAX_OCCURRENCES_PER_WINDOW` emissions fail with
/// `RangeTooLarge`.
pub fn expand(
    rule: &RecurrenceRule,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> ScheduleResult<Vec<Occurrence>> {
    rule.validate()?;

    if !rule.is_active() || window_end <= window_start {
        return Ok(Vec::new());
    }
    if window_end <= midnight(rule.start_date) {
        return Ok(Vec::new());
    }
    if let Some(end_date) = rule.end_date {
        // The last possible occurrence ends within a day-plus-duration of its date.
        let last_possible =
            midnight(end_date) + Duration::days(1) + Duration::minutes(rule.duration_minutes);
        if window_start > last_possible {
            return Ok(Vec::new());
        }
    }

    // Scan far enough below the window that an occurrence starting earlier
    // but still running at window start is considered; a rule's duration can
    // span several days. The clip filter drops anything that doesn't actually
    // reach the window.
    let spill_days = 1 + rule.duration_minutes / (24 * 60);
    let scan_floor = window_start.date_naive() - Duration::days(spill_days);
    let lower = rule.start_date.max(scan_floor);

    let (mut cursor, mut index) = seed(rule, lower);

    let limit = match rule.end_date {
        Some(end_date) => window_end.date_naive().min(end_date),
        None => window_end.date_naive(),
    };

    let duration = Duration::minutes(rule.duration_minutes);
    let mut occurrences = Vec::new();

    while cursor <= limit {
        let start = cursor.and_time(rule.time).and_utc();
        let end = start + duration;

        if start < window_end && end > window_start {
            if occurrences.len() >= MAX_OCCURRENCES_PER_WINDOW {
                return Err(ScheduleError::RangeTooLarge {
                    max: MAX_OCCURRENCES_PER_WINDOW,
                });
            }
            occurrences.push(Occurrence {
                rule_id: rule.id,
                start,
                end,
                sequence_index: index,
            });
        }

        index += 1;
        cursor = advance(rule, cursor);
    }

    Ok(occurrences)
}

/// The next occurrence with `start >= now`, searched over a geometrically
/// growing horizon up to ~2 years. `None` when nothing is upcoming.
pub fn next_execution(
    rule: &RecurrenceRule,
    now: DateTime<Utc>,
) -> ScheduleResult<Option<Occurrence>> {
    let mut horizon = EXECUTION_SEARCH_DAYS;
    loop {
        let occurrences = expand(rule, now, now + Duration::days(horizon))?;
        if let Some(next) = occurrences.into_iter().find(|o| o.start >= now) {
            return Ok(Some(next));
        }
        if horizon >= EXECUTION_SEARCH_CAP_DAYS {
            return Ok(None);
        }
        horizon = (horizon * 2).min(EXECUTION_SEARCH_CAP_DAYS);
    }
}

/// The most recent occurrence with `start < now`, searched backward
/// symmetrically to [`next_execution`].
pub fn last_execution(
    rule: &RecurrenceRule,
    now: DateTime<Utc>,
) -> ScheduleResult<Option<Occurrence>> {
    let mut horizon = EXECUTION_SEARCH_DAYS;
    loop {
        let occurrences = expand(rule, now - Duration::days(horizon), now)?;
        if let Some(last) = occurrences.into_iter().rev().find(|o| o.start < now) {
            return Ok(Some(last));
        }
        if horizon >= EXECUTION_SEARCH_CAP_DAYS {
            return Ok(None);
        }
        horizon = (horizon * 2).min(EXECUTION_SEARCH_CAP_DAYS);
    }
}

/// First occurrence date on/after `lower`, with its sequence index.
fn seed(rule: &RecurrenceRule, lower: NaiveDate) -> (NaiveDate, u32) {
    match rule.frequency {
        Frequency::Daily => {
            let anchor = rule.start_date;
            if lower <= anchor {
                (anchor, 0)
            } else {
                let diff = (lower - anchor).num_days();
                (lower, diff as u32)
            }
        }
        Frequency::Weekly | Frequency::Biweekly => {
            let period = rule.frequency.period_days().unwrap();
            // First date on/after start_date that lands on the rule's weekday.
            let start_weekday = rule.start_date.weekday().num_days_from_sunday() as i64;
            let offset = (rule.day as i64 + 7 - start_weekday) % 7;
            let anchor = rule.start_date + Duration::days(offset);

            if lower <= anchor {
                (anchor, 0)
            } else {
                let diff = (lower - anchor).num_days();
                let k = (diff + period - 1) / period;
                (anchor + Duration::days(k * period), k as u32)
            }
        }
        Frequency::Monthly => {
            let first = clamped_date(rule.start_date.year(), rule.start_date.month(), rule.day);
            let (anchor_year, anchor_month) = if first >= rule.start_date {
                (rule.start_date.year(), rule.start_date.month())
            } else {
                shift_months(rule.start_date.year(), rule.start_date.month(), 1)
            };

            let month_index = |year: i32, month: u32| year * 12 + month as i32 - 1;
            let occurrence = |n: i32| {
                let (year, month) = shift_months(anchor_year, anchor_month, n);
                clamped_date(year, month, rule.day)
            };

            let mut n =
                (month_index(lower.year(), lower.month()) - month_index(anchor_year, anchor_month))
                    .max(0);
            while n > 0 && occurrence(n - 1) >= lower {
                n -= 1;
            }
            while occurrence(n) < lower {
                n += 1;
            }
            (occurrence(n), n as u32)
        }
    }
}

/// Next occurrence date after `cursor`.
///
/// Monthly advancement recomputes the clamped day against the target month
/// so a day-31 rule yields Jan 31 -> Feb 28 -> Mar 31, never sticking at 28.
fn advance(rule: &RecurrenceRule, cursor: NaiveDate) -> NaiveDate {
    match rule.frequency.period_days() {
        Some(days) => cursor + Duration::days(days),
        None => {
            let (year, month) = shift_months(cursor.year(), cursor.month(), 1);
            clamped_date(year, month, rule.day)
        }
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc()
}
