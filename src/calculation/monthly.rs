//! Monthly aggregation.
//!
//! Sums a month's daily values, summarizes approved absences and chains the
//! flextime balance from the previous month. Tariff-driven evaluation rules
//! (credit types capping the carryover) are not modelled, so overtime and
//! undertime move into flextime one to one.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AbsenceCategory, AbsenceDay, DailyValue, MonthlyValue};

/// Approved absences of one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceSummary {
    /// Vacation days, half days included.
    pub vacation_taken: Decimal,
    /// Sick days; a partial sick day counts as a whole one.
    pub sick_days: i32,
    /// Days of any other absence category.
    pub other_absence_days: i32,
}

/// The computed figures of one employee-month, before they are stamped with
/// identity and lifecycle fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCalculation {
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
    /// Previous month's closing balance, or 0.
    pub flextime_start: i32,
    /// Overtime minus undertime of this month.
    pub flextime_change: i32,
    /// Closing balance.
    pub flextime_end: i32,
    /// Balance published for the next month.
    pub flextime_carryover: i32,
    /// Approved absences.
    pub absences: AbsenceSummary,
    /// Days with recorded work.
    pub work_days: i32,
    /// Days flagged with booking errors.
    pub days_with_errors: i32,
}

/// Summarizes approved absence days; all other statuses are ignored.
pub fn summarize_absences(absences: &[AbsenceDay]) -> AbsenceSummary {
    absences
        .iter()
        .filter(|a| a.is_approved())
        .fold(AbsenceSummary::default(), |mut summary, absence| {
            match absence.category {
                AbsenceCategory::Vacation => summary.vacation_taken += absence.duration,
                AbsenceCategory::Illness => {
                    summary.sick_days += absence.duration.ceil().to_i32().unwrap_or(1)
                }
                AbsenceCategory::Special | AbsenceCategory::Unpaid => {
                    summary.other_absence_days += 1
                }
            }
            summary
        })
}

/// Aggregates one month.
///
/// # Arguments
///
/// * `daily_values` - Every daily value of the month
/// * `absences` - Every absence day of the month, any status
/// * `previous` - The previous month's record, if one exists
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::calculate_month;
/// use flextime_engine::models::DailyValue;
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let day = DailyValue {
///     employee_id: Uuid::nil(),
///     value_date: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
///     gross_time: 540,
///     net_time: 510,
///     target_time: 480,
///     break_time: 30,
///     overtime: 30,
///     undertime: 0,
///     has_error: false,
///     warnings: vec![],
/// };
///
/// let month = calculate_month(&[day], &[], None);
/// assert_eq!(month.flextime_start, 0);
/// assert_eq!(month.flextime_change, 30);
/// assert_eq!(month.flextime_end, 30);
/// assert_eq!(month.work_days, 1);
/// ```
pub fn calculate_month(
    daily_values: &[DailyValue],
    absences: &[AbsenceDay],
    previous: Option<&MonthlyValue>,
) -> MonthCalculation {
    let mut month = daily_values
        .iter()
        .fold(MonthCalculation::default(), |mut acc, day| {
            acc.total_gross_time += day.gross_time;
            acc.total_net_time += day.net_time;
            acc.total_target_time += day.target_time;
            acc.total_overtime += day.overtime;
            acc.total_undertime += day.undertime;
            acc.total_break_time += day.break_time;
            if day.is_work_day() {
                acc.work_days += 1;
            }
            if day.has_error {
                acc.days_with_errors += 1;
            }
            acc
        });

    month.flextime_start = previous.map_or(0, |p| p.flextime_end);
    month.flextime_change = month.total_overtime - month.total_undertime;
    month.flextime_end = month.flextime_start + month.flextime_change;
    month.flextime_carryover = month.flextime_end;
    month.absences = summarize_absences(absences);
    month
}

/// Stamps a month calculation with identity and lifecycle fields.
///
/// When `existing` is given its id, tenant, creation time and close/reopen
/// history are kept, so recalculating an unchanged month yields an identical
/// record. The result is always open; callers must refuse closed months
/// before getting here.
pub fn build_monthly_value(
    existing: Option<&MonthlyValue>,
    tenant_id: Uuid,
    employee_id: Uuid,
    year: i32,
    month: u32,
    calculation: &MonthCalculation,
    now: DateTime<Utc>,
) -> MonthlyValue {
    MonthlyValue {
        id: existing.map_or_else(Uuid::new_v4, |e| e.id),
        tenant_id: existing.map_or(tenant_id, |e| e.tenant_id),
        employee_id,
        year,
        month,
        total_gross_time: calculation.total_gross_time,
        total_net_time: calculation.total_net_time,
        total_target_time: calculation.total_target_time,
        total_overtime: calculation.total_overtime,
        total_undertime: calculation.total_undertime,
        total_break_time: calculation.total_break_time,
        flextime_start: calculation.flextime_start,
        flextime_change: calculation.flextime_change,
        flextime_end: calculation.flextime_end,
        flextime_carryover: calculation.flextime_carryover,
        vacation_taken: calculation.absences.vacation_taken,
        sick_days: calculation.absences.sick_days,
        other_absence_days: calculation.absences.other_absence_days,
        work_days: calculation.work_days,
        days_with_errors: calculation.days_with_errors,
        is_closed: false,
        closed_at: existing.and_then(|e| e.closed_at),
        closed_by: existing.and_then(|e| e.closed_by),
        reopened_at: existing.and_then(|e| e.reopened_at),
        reopened_by: existing.and_then(|e| e.reopened_by),
        created_at: existing.map_or(now, |e| e.created_at),
    }
}
