//! Pure date/time arithmetic for recurrence and conflict computation.
//!
//! Everything here is side-effect free. Interval tests are half-open:
//! two back-to-back intervals (one ending exactly when the other starts)
//! do NOT overlap, which the buffer checks rely on.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::rule::Frequency;

/// A half-open `[start, end)` time interval in the caller's canonical zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, rejecting `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ScheduleResult<Self> {
        if end <= start {
            return Err(ScheduleError::MalformedInterval(format!(
                "Interval end {} is not after start {}",
                end, start
            )));
        }
        Ok(Interval { start, end })
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Minutes between the two intervals when they do not overlap.
    /// Zero for back-to-back intervals, None when they overlap.
    pub fn gap_minutes(&self, other: &Interval) -> Option<i64> {
        if self.overlaps(other) {
            return None;
        }
        if self.end <= other.start {
            Some((other.start - self.end).num_minutes())
        } else {
            Some((self.start - other.end).num_minutes())
        }
    }
}

/// Half-open interval overlap test: `a_start < b_end && b_start < a_end`.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // First of the next month minus one day is always valid.
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .pred_opt()
        .unwrap()
        .day()
}

/// Build a date from year/month and a desired day-of-month, clamping the day
/// to the month's length (day 31 in February becomes Feb 28/29).
pub fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.min(days_in_month(year, month)).max(1);
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Shift a (year, month) pair by `count` months (may be negative).
pub fn shift_months(year: i32, month: u32, count: i32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 + count;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

/// Advance `date` by `count` periods of `frequency`.
///
/// Monthly advancement preserves the date's day-of-month, clamped to the
/// target month's length.
pub fn add_interval(date: NaiveDate, frequency: Frequency, count: i32) -> NaiveDate {
    match frequency.period_days() {
        Some(days) => date + chrono::Duration::days(days * count as i64),
        None => {
            let (year, month) = shift_months(date.year(), date.month(), count);
            clamped_date(year, month, date.day())
        }
    }
}

/// Whether `date` matches the rule's `day` under the frequency's semantics.
///
/// Daily matches every date. Weekly/Biweekly match the Sunday-based weekday
/// (the biweekly period phase is the expander's concern). Monthly matches the
/// day-of-month after clamping to the month's length.
pub fn matches_day(date: NaiveDate, frequency: Frequency, day: u32) -> bool {
    match frequency {
        Frequency::Daily => true,
        Frequency::Weekly | Frequency::Biweekly => {
            date.weekday().num_days_from_sunday() == day
        }
        Frequency::Monthly => date.day() == day.min(days_in_month(date.year(), date.month())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_overlaps_is_exact_at_boundaries() {
        let t = |h| Utc.with_ymd_and_hms(2025, 3, 20, h, 0, 0).unwrap();
        // Back-to-back intervals do not overlap.
        assert!(!overlaps(t(0), t(10), t(10), t(20)));
        // One hour of shared time does.
        assert!(overlaps(t(0), t(10), t(9), t(20)));
        // Symmetric.
        assert!(overlaps(t(9), t(20), t(0), t(10)));
    }

    #[test]
    fn test_add_interval_daily_weekly_biweekly() {
        let d = date(2025, 3, 3);
        assert_eq!(add_interval(d, Frequency::Daily, 5), date(2025, 3, 8));
        assert_eq!(add_interval(d, Frequency::Weekly, 2), date(2025, 3, 17));
        assert_eq!(add_interval(d, Frequency::Biweekly, 1), date(2025, 3, 17));
    }

    #[test]
    fn test_add_interval_monthly_clamps_to_short_month() {
        assert_eq!(
            add_interval(date(2025, 1, 31), Frequency::Monthly, 1),
            date(2025, 2, 28)
        );
        // Leap year.
        assert_eq!(
            add_interval(date(2024, 1, 31), Frequency::Monthly, 1),
            date(2024, 2, 29)
        );
        assert_eq!(
            add_interval(date(2025, 3, 31), Frequency::Monthly, 1),
            date(2025, 4, 30)
        );
    }

    #[test]
    fn test_shift_months_crosses_year_boundaries() {
        assert_eq!(shift_months(2025, 11, 3), (2026, 2));
        assert_eq!(shift_months(2025, 1, -1), (2024, 12));
    }

    #[test]
    fn test_matches_day_weekly_is_sunday_based() {
        // 2025-03-23 is a Sunday.
        assert!(matches_day(date(2025, 3, 23), Frequency::Weekly, 0));
        assert!(matches_day(date(2025, 3, 26), Frequency::Biweekly, 3));
        assert!(!matches_day(date(2025, 3, 26), Frequency::Weekly, 4));
    }

    #[test]
    fn test_matches_day_monthly_clamps() {
        assert!(matches_day(date(2025, 2, 28), Frequency::Monthly, 31));
        assert!(!matches_day(date(2025, 2, 27), Frequency::Monthly, 31));
        assert!(matches_day(date(2025, 1, 31), Frequency::Monthly, 31));
    }

    #[test]
    fn test_interval_gap_minutes() {
        let t = |h, m| Utc.with_ymd_and_hms(2025, 3, 20, h, m, 0).unwrap();
        let a = Interval::new(t(9, 0), t(10, 0)).unwrap();
        let b = Interval::new(t(10, 0), t(11, 0)).unwrap();
        let c = Interval::new(t(10, 30), t(11, 30)).unwrap();
        let d = Interval::new(t(9, 30), t(10, 30)).unwrap();

        assert_eq!(a.gap_minutes(&b), Some(0));
        assert_eq!(a.gap_minutes(&c), Some(30));
        assert_eq!(c.gap_minutes(&a), Some(30));
        assert_eq!(a.gap_minutes(&d), None);
    }

    #[test]
    fn test_interval_rejects_inverted_bounds() {
        let t = |h| Utc.with_ymd_and_hms(2025, 3, 20, h, 0, 0).unwrap();
        assert!(Interval::new(t(10), t(9)).is_err());
        assert!(Interval::new(t(10), t(10)).is_err());
    }
}
