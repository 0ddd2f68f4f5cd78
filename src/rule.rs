//! Recurrence rule records.
//!
//! A `RecurrenceRule` describes a repeating service appointment for a customer
//! (e.g. "cleaning every other Tuesday at 09:00 for 120 minutes"). The rule is
//! supplied by the API layer; the core only expands and validates it.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ScheduleError, ScheduleResult};

/// How often a rule repeats.
///
/// Wire code: 0=Daily, 1=Weekly, 2=Biweekly, 3=Monthly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    /// Integer code used by the surrounding system's wire format.
    pub fn code(&self) -> u8 {
        match self {
            Frequency::Daily => 0,
            Frequency::Weekly => 1,
            Frequency::Biweekly => 2,
            Frequency::Monthly => 3,
        }
    }

    /// Days between consecutive occurrences, where fixed (None for Monthly).
    pub fn period_days(&self) -> Option<i64> {
        match self {
            Frequency::Daily => Some(1),
            Frequency::Weekly => Some(7),
            Frequency::Biweekly => Some(14),
            Frequency::Monthly => None,
        }
    }
}

impl From<Frequency> for u8 {
    fn from(f: Frequency) -> u8 {
        f.code()
    }
}

impl TryFrom<u8> for Frequency {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Frequency::Daily),
            1 => Ok(Frequency::Weekly),
            2 => Ok(Frequency::Biweekly),
            3 => Ok(Frequency::Monthly),
            other => Err(format!("Unknown frequency code: {other}")),
        }
    }
}

/// Lifecycle state of a rule. Only `Active` rules produce occurrences.
///
/// Wire code: 0=Active, 1=Paused, 2=Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RuleStatus {
    Active,
    Paused,
    Completed,
}

impl RuleStatus {
    pub fn code(&self) -> u8 {
        match self {
            RuleStatus::Active => 0,
            RuleStatus::Paused => 1,
            RuleStatus::Completed => 2,
        }
    }
}

impl From<RuleStatus> for u8 {
    fn from(s: RuleStatus) -> u8 {
        s.code()
    }
}

impl TryFrom<u8> for RuleStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(RuleStatus::Active),
            1 => Ok(RuleStatus::Paused),
            2 => Ok(RuleStatus::Completed),
            other => Err(format!("Unknown rule status code: {other}")),
        }
    }
}

/// A recurring appointment rule (externally persisted, supplied as-is).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub id: Uuid,
    pub company_id: Uuid,
    pub customer_id: Uuid,
    pub team_id: Option<Uuid>,
    pub title: String,
    pub address: String,
    pub notes: Option<String>,

    pub frequency: Frequency,
    /// Day-of-week (0-6, Sunday-based) for Weekly/Biweekly, day-of-month
    /// (1-31, clamped to the month's length) for Monthly, ignored for Daily.
    pub day: u32,
    /// Wall-clock start time of each occurrence.
    pub time: NaiveTime,
    /// Occurrence length in minutes.
    pub duration_minutes: i64,

    pub start_date: NaiveDate,
    /// Absent means the rule is unbounded.
    pub end_date: Option<NaiveDate>,
    pub status: RuleStatus,

    /// Cached occurrence timestamps (derived, not authoritative).
    pub last_execution: Option<DateTime<Utc>>,
    pub next_execution: Option<DateTime<Utc>>,
}

impl RecurrenceRule {
    /// Check the rule's structural invariants.
    ///
    /// Bad `day` values for the frequency, non-positive duration, and inverted
    /// date bounds are configuration errors the caller must fix.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.duration_minutes <= 0 {
            return Err(ScheduleError::InvalidRule(format!(
                "Duration must be positive, got {} minutes",
                self.duration_minutes
            )));
        }

        match self.frequency {
            Frequency::Daily => {}
            Frequency::Weekly | Frequency::Biweekly => {
                if self.day > 6 {
                    return Err(ScheduleError::InvalidRule(format!(
                        "Day-of-week must be 0-6 for weekly rules, got {}",
                        self.day
                    )));
                }
            }
            Frequency::Monthly => {
                if self.day < 1 || self.day > 31 {
                    return Err(ScheduleError::InvalidRule(format!(
                        "Day-of-month must be 1-31 for monthly rules, got {}",
                        self.day
                    )));
                }
            }
        }

        if let Some(end) = self.end_date {
            if self.start_date > end {
                return Err(ScheduleError::InvalidRule(format!(
                    "Rule start date {} is after end date {}",
                    self.start_date, end
                )));
            }
        }

        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == RuleStatus::Active
    }
}
