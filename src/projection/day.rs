//! Day view: half-hour slots with pixel-positioned placements.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::appointment::Appointment;
use crate::constants::SLOT_MINUTES;
use crate::projection::GridConfig;

/// One appointment placed on the day grid with absolute pixel geometry.
///
/// Overlapping placements keep their own offsets; stacking or overlaying
/// colliding entries is the UI's decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub appointment_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Pixels from the top of the grid (measured from `base_hour`).
    /// Negative when the appointment starts before `base_hour`.
    pub top_offset_px: f64,
    pub height_px: f64,
}

/// A half-hour slot holding the placements that start inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySlot {
    pub start: NaiveTime,
    pub placements: Vec<Placement>,
}

/// The full-day slot list for one date. Callers pick the visible subrange
/// (the UI typically shows 06:00-23:00).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGrid {
    pub date: NaiveDate,
    pub slots: Vec<DaySlot>,
}

pub(super) fn build(appointments: &[Appointment], anchor: NaiveDate, config: &GridConfig) -> DayGrid {
    let slot_count = (24 * 60 / SLOT_MINUTES) as usize;
    let mut slots: Vec<DaySlot> = (0..slot_count)
        .map(|i| {
            let minute = i as u32 * SLOT_MINUTES;
            DaySlot {
                start: NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap(),
                placements: Vec::new(),
            }
        })
        .collect();

    let px_per_minute = config.hour_height_px / 60.0;

    let mut todays: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| a.start.date_naive() == anchor)
        .collect();
    todays.sort_by_key(|a| a.start);

    for appointment in todays {
        let start_minute = appointment.start.time().hour() * 60 + appointment.start.time().minute();
        let minutes_from_base = start_minute as i64 - config.base_hour as i64 * 60;
        let duration_minutes = (appointment.end - appointment.start).num_minutes();

        let placement = Placement {
            appointment_id: appointment.id,
            start: appointment.start,
            end: appointment.end,
            top_offset_px: minutes_from_base as f64 * px_per_minute,
            height_px: (duration_minutes as f64 * px_per_minute).max(config.min_height_px),
        };

        let slot_index = (start_minute / SLOT_MINUTES) as usize;
        slots[slot_index.min(slot_count - 1)].placements.push(placement);
    }

    DayGrid {
        date: anchor,
        slots,
    }
}
