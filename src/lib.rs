//! Scheduling core for the agenda ecosystem.
//!
//! Pure, synchronous computation over in-memory records: the API layer
//! supplies `RecurrenceRule`, `Appointment`, and `SchedulingSettings` values
//! and gets back occurrence lists, conflict lists, and calendar-grid
//! view-models. No persistence, no transport, no timezone conversion - all
//! timestamps live in one canonical zone decided by the caller.
//!
//! - `time_math` - date arithmetic and interval tests
//! - `expander` - recurrence rule -> concrete occurrences for a window
//! - `conflict` - candidate interval vs committed appointments
//! - `freebusy` - free slots within working hours
//! - `projection` - day/week/month grid view-models
//! - `facade` - the two composed use cases (view rendering, booking checks)

pub mod appointment;
pub mod conflict;
pub mod constants;
pub mod error;
pub mod expander;
pub mod facade;
pub mod freebusy;
pub mod projection;
pub mod rule;
pub mod settings;
pub mod time_math;
pub mod window;

pub use appointment::{Appointment, AppointmentStatus};
pub use conflict::{find_conflicts, Conflict, ConflictKind};
pub use error::{ScheduleError, ScheduleResult};
pub use expander::{expand, last_execution, next_execution, Occurrence};
pub use facade::{schedule_view, schedule_view_with_config, validate_booking, BookingOutcome};
pub use freebusy::{find_first_free_slot, find_free_slots, FreeSlot};
pub use projection::{
    project, project_with_config, CalendarGrid, DayBucket, DayGrid, DaySlot, GridConfig,
    MonthCell, MonthDayCell, MonthGrid, Placement, ViewMode, WeekGrid,
};
pub use rule::{Frequency, RecurrenceRule, RuleStatus};
pub use settings::SchedulingSettings;
pub use time_math::{add_interval, matches_day, overlaps, Interval};
pub use window::QueryWindow;
