//! Error types for the agenda scheduling core.

use thiserror::Error;

/// Errors that can occur in scheduling computations.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("Query window too large: expansion exceeded {max} occurrences")]
    RangeTooLarge { max: usize },

    #[error("Malformed interval: {0}")]
    MalformedInterval(String),
}

/// Result type alias for scheduling operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
