//! Per-company scheduling settings.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Scheduling policy for a company or resource (externally supplied).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingSettings {
    /// Working weekdays, Sunday-based 0-6.
    pub working_days: HashSet<u32>,
    /// Start of the working day.
    pub default_start_time: NaiveTime,
    /// End of the working day.
    pub default_end_time: NaiveTime,
    /// Minimum gap required between two appointments for the same resource.
    pub buffer_minutes: i64,
    /// When true, only double bookings are flagged, never buffer violations.
    pub allow_overlapping: bool,
    /// Dates excluded entirely from scheduling.
    pub holidays: HashSet<NaiveDate>,
}

impl Default for SchedulingSettings {
    /// Monday-Friday, 08:00-18:00, no buffer, overlapping allowed, no holidays.
    fn default() -> Self {
        SchedulingSettings {
            working_days: (1..=5).collect(),
            default_start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            default_end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            buffer_minutes: 0,
            allow_overlapping: true,
            holidays: HashSet::new(),
        }
    }
}

impl SchedulingSettings {
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;
        self.working_days.contains(&date.weekday().num_days_from_sunday())
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}
