//! Committed appointment records.
//!
//! Appointments are persisted by the API layer; the core only reads them for
//! conflict detection and calendar projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a committed appointment.
///
/// Wire code: 0=Scheduled, 1=InProgress, 2=Completed, 3=Cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn code(&self) -> u8 {
        match self {
            AppointmentStatus::Scheduled => 0,
            AppointmentStatus::InProgress => 1,
            AppointmentStatus::Completed => 2,
            AppointmentStatus::Cancelled => 3,
        }
    }
}

impl From<AppointmentStatus> for u8 {
    fn from(s: AppointmentStatus) -> u8 {
        s.code()
    }
}

impl TryFrom<u8> for AppointmentStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(AppointmentStatus::Scheduled),
            1 => Ok(AppointmentStatus::InProgress),
            2 => Ok(AppointmentStatus::Completed),
            3 => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("Unknown appointment status code: {other}")),
        }
    }
}

/// A committed appointment.
///
/// `professional_id` is absent for team-serviced appointments (including
/// occurrences materialized from team rules); a resource match accepts either
/// the professional or the team id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub professional_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub company_id: Uuid,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Whether this appointment belongs to the given professional or team.
    pub fn belongs_to(&self, resource_id: Uuid) -> bool {
        self.professional_id == Some(resource_id) || self.team_id == Some(resource_id)
    }

    /// Cancelled appointments are invisible to conflict checks and projection.
    pub fn is_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Cancelled
    }

    /// Whether start/end can be ordered as a proper interval.
    pub fn has_valid_interval(&self) -> bool {
        self.start < self.end
    }
}
