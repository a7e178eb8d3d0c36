//! Absence day model.
//!
//! Absences are owned by the absence module; the monthly aggregator only
//! needs each day's approval status, category and (possibly fractional)
//! duration.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Approval state of an absence request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceStatus {
    /// Requested, awaiting a decision.
    Pending,
    /// Approved by a supervisor. Only these count toward monthly figures.
    Approved,
    /// Turned down.
    Rejected,
    /// Withdrawn by the employee.
    Cancelled,
}

/// Category of the absence type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceCategory {
    /// Paid vacation, may be taken in half days.
    Vacation,
    /// Sick leave.
    Illness,
    /// Special leave (wedding, bereavement, ...).
    Special,
    /// Unpaid leave.
    Unpaid,
}

/// One day of absence for an employee.
///
/// # Example
///
/// ```
/// use flextime_engine::models::{AbsenceCategory, AbsenceDay, AbsenceStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let half_day = AbsenceDay {
///     employee_id: Uuid::nil(),
///     absence_date: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
///     category: AbsenceCategory::Vacation,
///     status: AbsenceStatus::Approved,
///     duration: Decimal::new(5, 1),
/// };
/// assert!(half_day.is_approved());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceDay {
    /// The absent employee.
    pub employee_id: Uuid,
    /// The calendar day of the absence.
    pub absence_date: NaiveDate,
    /// Category of the absence type.
    pub category: AbsenceCategory,
    /// Approval state.
    pub status: AbsenceStatus,
    /// Fraction of the day taken (1 for a full day, 0.5 for a half day).
    pub duration: Decimal,
}

impl AbsenceDay {
    /// Returns true if the absence has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == AbsenceStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_absence_day() {
        let json = r#"{
            "employee_id": "00000000-0000-0000-0000-000000000000",
            "absence_date": "2026-02-03",
            "category": "illness",
            "status": "pending",
            "duration": "1"
        }"#;

        let day: AbsenceDay = serde_json::from_str(json).unwrap();
        assert_eq!(day.category, AbsenceCategory::Illness);
        assert_eq!(day.duration, Decimal::ONE);
        assert!(!day.is_approved());
    }

    #[test]
    fn test_rejected_is_not_approved() {
        let day = AbsenceDay {
            employee_id: Uuid::nil(),
            absence_date: NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
            category: AbsenceCategory::Special,
            status: AbsenceStatus::Rejected,
            duration: Decimal::ONE,
        };
        assert!(!day.is_approved());
    }
}
