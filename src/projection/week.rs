//! Week view: seven day buckets centered on the anchor date.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::appointment::Appointment;

/// The appointments of one calendar date, sorted by start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub appointments: Vec<Appointment>,
}

/// Seven consecutive day buckets, anchor - 3 through anchor + 3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekGrid {
    pub anchor: NaiveDate,
    pub days: Vec<DayBucket>,
}

pub(super) fn build(appointments: &[Appointment], anchor: NaiveDate) -> WeekGrid {
    let days = (-3..=3)
        .map(|offset| {
            let date = anchor + Duration::days(offset);
            let mut bucket: Vec<Appointment> = appointments
                .iter()
                .filter(|a| a.start.date_naive() == date)
                .cloned()
                .collect();
            bucket.sort_by_key(|a| a.start);
            DayBucket {
                date,
                appointments: bucket,
            }
        })
        .collect();

    WeekGrid { anchor, days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::AppointmentStatus;
    use crate::projection::{project, CalendarGrid, ViewMode};
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn appt(start: DateTime<Utc>) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            start,
            end: start + Duration::hours(1),
            professional_id: Some(Uuid::new_v4()),
            team_id: None,
            company_id: Uuid::new_v4(),
            status: AppointmentStatus::Scheduled,
        }
    }

    #[test]
    fn test_week_is_centered_on_anchor() {
        let anchor = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let CalendarGrid::Week(grid) = project(&[], ViewMode::Week, anchor) else {
            panic!("expected week grid");
        };

        assert_eq!(grid.days.len(), 7);
        assert_eq!(grid.days[0].date, NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
        assert_eq!(grid.days[3].date, anchor);
        assert_eq!(grid.days[6].date, NaiveDate::from_ymd_opt(2025, 3, 23).unwrap());
    }

    #[test]
    fn test_appointments_land_in_their_date_bucket_sorted() {
        let anchor = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let late = appt(Utc.with_ymd_and_hms(2025, 3, 18, 14, 0, 0).unwrap());
        let early = appt(Utc.with_ymd_and_hms(2025, 3, 18, 8, 0, 0).unwrap());
        let outside = appt(Utc.with_ymd_and_hms(2025, 3, 25, 9, 0, 0).unwrap());

        let CalendarGrid::Week(grid) =
            project(&[late.clone(), early.clone(), outside], ViewMode::Week, anchor)
        else {
            panic!("expected week grid");
        };

        let tuesday = &grid.days[1];
        assert_eq!(tuesday.appointments.len(), 2);
        assert_eq!(tuesday.appointments[0].id, early.id);
        assert_eq!(tuesday.appointments[1].id, late.id);
        // The appointment past the window shows up nowhere.
        let total: usize = grid.days.iter().map(|d| d.appointments.len()).sum();
        assert_eq!(total, 2);
    }
}
