//! Query windows for expansion and projection.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::error::{ScheduleError, ScheduleResult};
use crate::time_math::shift_months;

/// A half-open `[start, end)` query window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl QueryWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ScheduleResult<Self> {
        if end <= start {
            return Err(ScheduleError::MalformedInterval(format!(
                "Window end {} is not after start {}",
                end, start
            )));
        }
        Ok(QueryWindow { start, end })
    }

    /// The single calendar day of `anchor`.
    pub fn for_day(anchor: NaiveDate) -> Self {
        QueryWindow {
            start: midnight(anchor),
            end: midnight(anchor + Duration::days(1)),
        }
    }

    /// Seven days centered on `anchor` (anchor - 3 through anchor + 3).
    pub fn for_week(anchor: NaiveDate) -> Self {
        QueryWindow {
            start: midnight(anchor - Duration::days(3)),
            end: midnight(anchor + Duration::days(4)),
        }
    }

    /// The full calendar month containing `anchor`.
    pub fn for_month(anchor: NaiveDate) -> Self {
        let first = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1).unwrap();
        let (next_year, next_month) = shift_months(anchor.year(), anchor.month(), 1);
        let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap();
        QueryWindow {
            start: midnight(first),
            end: midnight(next_first),
        }
    }

    /// `now` plus/minus `days`.
    pub fn around(now: DateTime<Utc>, days: i64) -> Self {
        QueryWindow {
            start: now - Duration::days(days),
            end: now + Duration::days(days),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc()
}
