//! Calendar-grid projection.
//!
//! Turns a set of concrete appointments into the view-model consumed by the
//! day, week, and month calendar views. Pure geometry: the projector assigns
//! buckets and pixel offsets, the UI layer owns everything visual beyond that.
//!
//! All inputs are in the caller's single canonical zone; the projector never
//! converts timezones.

mod day;
mod month;
mod week;

pub use day::{DayGrid, DaySlot, Placement};
pub use month::{MonthCell, MonthDayCell, MonthGrid};
pub use week::{DayBucket, WeekGrid};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::appointment::Appointment;
use crate::constants::{
    DEFAULT_HOUR_HEIGHT_PX, DEFAULT_MAX_VISIBLE_PER_DAY, DEFAULT_MIN_HEIGHT_PX,
};

/// Which calendar view to project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    Month,
}

/// Geometry knobs for grid projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Hour at the top of the day view; offsets are measured from it.
    pub base_hour: u32,
    /// Pixel height of one hour.
    pub hour_height_px: f64,
    /// Minimum rendered appointment height, so short ones stay visible.
    pub min_height_px: f64,
    /// Visible appointments per month cell before the "+N more" marker.
    pub max_visible_per_day: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            base_hour: 0,
            hour_height_px: DEFAULT_HOUR_HEIGHT_PX,
            min_height_px: DEFAULT_MIN_HEIGHT_PX,
            max_visible_per_day: DEFAULT_MAX_VISIBLE_PER_DAY,
        }
    }
}

/// Projection output, one variant per view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CalendarGrid {
    Day(DayGrid),
    Week(WeekGrid),
    Month(MonthGrid),
}

/// Project `appointments` into the grid for `view` anchored at `anchor`,
/// using default geometry.
pub fn project(appointments: &[Appointment], view: ViewMode, anchor: NaiveDate) -> CalendarGrid {
    project_with_config(appointments, view, anchor, &GridConfig::default())
}

/// Project `appointments` into the grid for `view` anchored at `anchor`.
///
/// Cancelled appointments are excluded. Appointments whose interval cannot be
/// ordered are skipped with a warning, never fatal to the projection.
pub fn project_with_config(
    appointments: &[Appointment],
    view: ViewMode,
    anchor: NaiveDate,
    config: &GridConfig,
) -> CalendarGrid {
    let visible = visible_appointments(appointments);
    match view {
        ViewMode::Day => CalendarGrid::Day(day::build(&visible, anchor, config)),
        ViewMode::Week => CalendarGrid::Week(week::build(&visible, anchor)),
        ViewMode::Month => CalendarGrid::Month(month::build(&visible, anchor, config)),
    }
}

/// Drop cancelled and malformed appointments before bucketing.
fn visible_appointments(appointments: &[Appointment]) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| {
            if a.is_cancelled() {
                return false;
            }
            if !a.has_valid_interval() {
                warn!(
                    appointment_id = %a.id,
                    start = %a.start,
                    end = %a.end,
                    "Skipping appointment with unorderable interval"
                );
                return false;
            }
            true
        })
        .cloned()
        .collect()
}
