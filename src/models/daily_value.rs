//! Daily value model.
//!
//! A [`DailyValue`] is the evaluated result of one employee-day. It is
//! recomputed on demand from booking pairs and stored by an external
//! repository; the monthly aggregator only reads it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BreakWarning;

/// One employee-day record.
///
/// All durations are minutes. `net_time = max(0, gross_time - break_time)`,
/// and at most one of `overtime` and `undertime` is non-zero.
///
/// # Example
///
/// ```
/// use flextime_engine::models::DailyValue;
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let value = DailyValue {
///     employee_id: Uuid::nil(),
///     value_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     gross_time: 540,
///     net_time: 510,
///     target_time: 480,
///     break_time: 30,
///     overtime: 30,
///     undertime: 0,
///     has_error: false,
///     warnings: vec![],
/// };
/// assert_eq!(value.flextime_delta(), 30);
/// assert!(value.is_work_day());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyValue {
    /// The employee this day belongs to.
    pub employee_id: Uuid,
    /// The calendar day.
    pub value_date: NaiveDate,
    /// Sum of all complete work pairs.
    pub gross_time: i32,
    /// Gross time minus deducted breaks, never negative.
    pub net_time: i32,
    /// Minutes the employee was expected to work.
    pub target_time: i32,
    /// Minutes deducted as break.
    pub break_time: i32,
    /// Net time above target.
    pub overtime: i32,
    /// Net time below target.
    pub undertime: i32,
    /// Set when the booking resolver found a problem with the day.
    pub has_error: bool,
    /// Break deduction diagnostics for the day.
    #[serde(default)]
    pub warnings: Vec<BreakWarning>,
}

impl DailyValue {
    /// Returns this day's contribution to the flextime balance.
    pub fn flextime_delta(&self) -> i32 {
        self.overtime - self.undertime
    }

    /// Returns true if any work was recorded on the day.
    pub fn is_work_day(&self) -> bool {
        self.gross_time > 0
    }
}
