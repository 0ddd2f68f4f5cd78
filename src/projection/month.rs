//! Month view: a flat cell list with leading blanks for weekday alignment.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::appointment::Appointment;
use crate::projection::GridConfig;
use crate::time_math::days_in_month;

/// One day cell of the month grid.
///
/// `appointments` holds the visible entries (truncated to the configured
/// maximum, sorted by start); `hidden_count` is the "+N more" marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthDayCell {
    pub date: NaiveDate,
    pub appointments: Vec<Appointment>,
    pub has_appointments: bool,
    pub hidden_count: usize,
}

/// A month grid cell: blank (weekday alignment before the 1st) or a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MonthCell {
    Blank,
    Day(MonthDayCell),
}

/// The full month grid for the anchor's calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<MonthCell>,
}

pub(super) fn build(appointments: &[Appointment], anchor: NaiveDate, config: &GridConfig) -> MonthGrid {
    let year = anchor.year();
    let month = anchor.month();
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();

    let leading_blanks = first.weekday().num_days_from_sunday() as usize;
    let mut cells = Vec::with_capacity(leading_blanks + 31);
    cells.extend((0..leading_blanks).map(|_| MonthCell::Blank));

    for day in 1..=days_in_month(year, month) {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let mut todays: Vec<Appointment> = appointments
            .iter()
            .filter(|a| a.start.date_naive() == date)
            .cloned()
            .collect();
        todays.sort_by_key(|a| a.start);

        let total = todays.len();
        let hidden_count = total.saturating_sub(config.max_visible_per_day);
        todays.truncate(config.max_visible_per_day);

        cells.push(MonthCell::Day(MonthDayCell {
            date,
            appointments: todays,
            has_appointments: total > 0,
            hidden_count,
        }));
    }

    MonthGrid { year, month, cells }
}
