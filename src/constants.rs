//! Numeric policy knobs shared across the scheduling core.

/// Hard cap on occurrences produced by a single expansion call.
/// Protects against unbounded daily rules expanded over multi-decade windows.
pub const MAX_OCCURRENCES_PER_WINDOW: usize = 10_000;

/// Initial lookahead/lookbehind horizon (days) for next/last execution search.
pub const EXECUTION_SEARCH_DAYS: i64 = 60;

/// Hard cap (days) on the execution search horizon (~2 years).
pub const EXECUTION_SEARCH_CAP_DAYS: i64 = 730;

/// Minutes covered by one day-view slot.
pub const SLOT_MINUTES: u32 = 30;

/// Default pixel height of one hour in the day view.
pub const DEFAULT_HOUR_HEIGHT_PX: f64 = 48.0;

/// Minimum rendered height of an appointment, so short ones stay visible.
pub const DEFAULT_MIN_HEIGHT_PX: f64 = 24.0;

/// Default visible appointments per month-view cell before truncation.
pub const DEFAULT_MAX_VISIBLE_PER_DAY: usize = 2;
