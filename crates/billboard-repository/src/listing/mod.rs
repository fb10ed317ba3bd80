//! Listing queries: one filtered, ordered `SelectQuery` per listed resource.

mod admin;
mod campaign;
mod inventory;
mod media_plan;
mod team;

pub use admin::*;
pub use campaign::*;
pub use inventory::*;
pub use media_plan::*;
pub use team::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a dated item stands relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Active,
    Upcoming,
    Completed,
}

impl ScheduleStatus {
    /// Status of a run from `start` to `end` (both inclusive) on `today`.
    #[must_use]
    pub fn of(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Self {
        if start > today {
            Self::Upcoming
        } else if end < today {
            Self::Completed
        } else {
            Self::Active
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_schedule_status() {
        assert_eq!(ScheduleStatus::of(d(10), d(20), d(9)), ScheduleStatus::Upcoming);
        assert_eq!(ScheduleStatus::of(d(10), d(20), d(10)), ScheduleStatus::Active);
        assert_eq!(ScheduleStatus::of(d(10), d(20), d(20)), ScheduleStatus::Active);
        assert_eq!(ScheduleStatus::of(d(10), d(20), d(21)), ScheduleStatus::Completed);
    }

    #[test]
    fn test_schedule_status_serializes_lowercase() {
        let json = serde_json::to_string(&ScheduleStatus::Upcoming).unwrap();
        assert_eq!(json, "\"upcoming\"");
        assert_eq!(ScheduleStatus::Completed.as_str(), "completed");
    }
}
