//! High-level orchestration of expansion, conflict detection, and projection.
//!
//! The two entry points cover the common API-layer use cases: rendering a
//! calendar view that mixes recurring-rule instances with committed
//! appointments, and validating a proposed booking before it is persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::appointment::Appointment;
use crate::conflict::{find_conflicts, Conflict};
use crate::error::ScheduleResult;
use crate::expander::expand;
use crate::projection::{project_with_config, CalendarGrid, GridConfig, ViewMode};
use crate::rule::RecurrenceRule;
use crate::settings::SchedulingSettings;
use crate::window::QueryWindow;

/// Outcome of a booking validation: schedulable or the full conflict list,
/// never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BookingOutcome {
    Schedulable,
    Conflicted(Vec<Conflict>),
}

impl BookingOutcome {
    pub fn is_schedulable(&self) -> bool {
        matches!(self, BookingOutcome::Schedulable)
    }
}

/// Validate a proposed create/reschedule against the resource's calendar.
pub fn validate_booking(
    candidate_start: DateTime<Utc>,
    candidate_end: DateTime<Utc>,
    resource_id: Uuid,
    existing: &[Appointment],
    settings: &SchedulingSettings,
) -> ScheduleResult<BookingOutcome> {
    let conflicts = find_conflicts(
        candidate_start,
        candidate_end,
        resource_id,
        existing,
        settings,
    )?;

    if conflicts.is_empty() {
        Ok(BookingOutcome::Schedulable)
    } else {
        Ok(BookingOutcome::Conflicted(conflicts))
    }
}

/// Project the calendar view for `anchor`, merging recurring-rule instances
/// with committed appointments, using default geometry.
pub fn schedule_view(
    rules: &[RecurrenceRule],
    appointments: &[Appointment],
    view: ViewMode,
    anchor: NaiveDate,
) -> ScheduleResult<CalendarGrid> {
    schedule_view_with_config(rules, appointments, view, anchor, &GridConfig::default())
}

/// Like [`schedule_view`] with explicit grid geometry.
///
/// Every rule is expanded over the view's window and its occurrences are
/// materialized as synthetic appointments (deterministic ids, so repeated
/// calls agree). A misconfigured rule fails the whole call; the caller must
/// fix the rule.
pub fn schedule_view_with_config(
    rules: &[RecurrenceRule],
    appointments: &[Appointment],
    view: ViewMode,
    anchor: NaiveDate,
    config: &GridConfig,
) -> ScheduleResult<CalendarGrid> {
    let window = match view {
        ViewMode::Day => QueryWindow::for_day(anchor),
        ViewMode::Week => QueryWindow::for_week(anchor),
        ViewMode::Month => QueryWindow::for_month(anchor),
    };

    let mut merged: Vec<Appointment> = appointments.to_vec();
    for rule in rules {
        let occurrences = expand(rule, window.start, window.end)?;
        merged.extend(occurrences.iter().map(|o| o.materialize(rule)));
    }

    Ok(project_with_config(&merged, view, anchor, config))
}
