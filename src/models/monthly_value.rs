//! Monthly value model.
//!
//! A [`MonthlyValue`] aggregates one employee-month and is the unit the
//! close/reopen lifecycle governs. Its `flextime_end` is read back as the
//! next month's `flextime_start`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One employee-month aggregate.
///
/// Identity is `(employee_id, year, month)`. Once `is_closed` is set, only a
/// reopen may change the record. `closed_at`/`closed_by` are written only by
/// a close and `reopened_at`/`reopened_by` only by a reopen; both pairs
/// survive later recalculations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyValue {
    /// Record identifier, stable across recalculations.
    pub id: Uuid,
    /// Tenant of the employee, passed through opaquely.
    pub tenant_id: Uuid,
    /// The employee.
    pub employee_id: Uuid,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,

    /// Sum of daily gross time.
    pub total_gross_time: i32,
    /// Sum of daily net time.
    pub total_net_time: i32,
    /// Sum of daily target time.
    pub total_target_time: i32,
    /// Sum of daily overtime.
    pub total_overtime: i32,
    /// Sum of daily undertime.
    pub total_undertime: i32,
    /// Sum of daily deducted breaks.
    pub total_break_time: i32,

    /// Balance carried in from the previous month.
    pub flextime_start: i32,
    /// This month's overtime minus undertime.
    pub flextime_change: i32,
    /// `flextime_start + flextime_change`.
    pub flextime_end: i32,
    /// Balance published for the next month; mirrors `flextime_end`.
    pub flextime_carryover: i32,

    /// Approved vacation taken, in days (half days allowed).
    pub vacation_taken: Decimal,
    /// Approved sick days.
    pub sick_days: i32,
    /// Approved absences of any other category.
    pub other_absence_days: i32,

    /// Days with recorded work.
    pub work_days: i32,
    /// Days flagged with booking errors.
    pub days_with_errors: i32,

    /// Whether the month is closed.
    pub is_closed: bool,
    /// When the month was last closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Who last closed the month.
    pub closed_by: Option<Uuid>,
    /// When the month was last reopened.
    pub reopened_at: Option<DateTime<Utc>>,
    /// Who last reopened the month.
    pub reopened_by: Option<Uuid>,

    /// When the record was first created.
    pub created_at: DateTime<Utc>,
}

impl MonthlyValue {
    /// Marks the month closed.
    pub fn mark_closed(&mut self, closed_by: Uuid, at: DateTime<Utc>) {
        self.is_closed = true;
        self.closed_at = Some(at);
        self.closed_by = Some(closed_by);
    }

    /// Marks the month reopened. The last close stays on record.
    pub fn mark_reopened(&mut self, reopened_by: Uuid, at: DateTime<Utc>) {
        self.is_closed = false;
        self.reopened_at = Some(at);
        self.reopened_by = Some(reopened_by);
    }

    /// Returns true if this record belongs to the given employee-month.
    pub fn is_for(&self, employee_id: Uuid, year: i32, month: u32) -> bool {
        self.employee_id == employee_id && self.year == year && self.month == month
    }
}
