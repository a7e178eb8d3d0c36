//! Daily value calculation.
//!
//! Turns one day's booking pairs into a [`DailyValue`]: gross time from the
//! work pairs, breaks from the break deduction engine, then net time and the
//! over- or undertime against the day's target.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::DayPlan;
use crate::models::{AuditStep, BookingPair, BreakRule, DailyValue, PairCategory, total_minutes};

use super::deduct_breaks;

/// The result of calculating one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCalculation {
    /// The evaluated day.
    pub daily_value: DailyValue,
    /// Ordered audit steps: gross time, break rules, net time.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates the daily value for one employee-day.
///
/// `has_error` comes from the booking-pair resolver and is copied onto the
/// result unchanged. Incomplete pairs contribute nothing.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::calculate_day;
/// use flextime_engine::models::{BookingPair, BreakRule, FixedBreak, PairCategory};
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let pairs = vec![BookingPair::new(480, 1020, PairCategory::Work)];
/// let rules = vec![BreakRule::Fixed(FixedBreak {
///     start_time: Some(720),
///     end_time: Some(750),
///     duration: 30,
/// })];
///
/// let result = calculate_day(
///     Uuid::nil(),
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     &pairs,
///     &rules,
///     480,
///     false,
///     1,
/// );
/// let day = result.daily_value;
/// assert_eq!(day.gross_time, 540);
/// assert_eq!(day.break_time, 30);
/// assert_eq!(day.net_time, 510);
/// assert_eq!(day.overtime, 30);
/// assert_eq!(day.undertime, 0);
/// ```
pub fn calculate_day(
    employee_id: Uuid,
    date: NaiveDate,
    pairs: &[BookingPair],
    rules: &[BreakRule],
    target_minutes: i32,
    has_error: bool,
    step_number: u32,
) -> DailyCalculation {
    let gross_time = total_minutes(pairs, PairCategory::Work);
    let recorded_break_time = total_minutes(pairs, PairCategory::Break);
    let skipped_pairs = pairs.iter().filter(|p| !p.is_complete()).count();

    let mut audit_steps = vec![AuditStep {
        step_number,
        rule_id: "gross_time".to_string(),
        rule_name: "Gross Work Time".to_string(),
        input: serde_json::json!({
            "pairs": pairs.len(),
            "incomplete_pairs": skipped_pairs,
        }),
        output: serde_json::json!({
            "gross_time": gross_time,
            "recorded_break_time": recorded_break_time,
        }),
        reasoning: format!(
            "{} work minutes and {} break minutes booked, {} incomplete pairs skipped",
            gross_time, recorded_break_time, skipped_pairs
        ),
    }];

    let breaks = deduct_breaks(pairs, recorded_break_time, gross_time, rules, step_number + 1);
    let break_time = breaks.deducted_minutes;
    let next_step = step_number + 1 + breaks.audit_steps.len() as u32;
    audit_steps.extend(breaks.audit_steps);

    let net_time = (gross_time - break_time).max(0);
    let overtime = (net_time - target_minutes).max(0);
    let undertime = (target_minutes - net_time).max(0);

    let reasoning = if overtime > 0 {
        format!(
            "{} net minutes exceed target of {} by {}",
            net_time, target_minutes, overtime
        )
    } else if undertime > 0 {
        format!(
            "{} net minutes fall short of target of {} by {}",
            net_time, target_minutes, undertime
        )
    } else {
        format!("{} net minutes meet target of {}", net_time, target_minutes)
    };

    audit_steps.push(AuditStep {
        step_number: next_step,
        rule_id: "net_time".to_string(),
        rule_name: "Net Time Against Target".to_string(),
        input: serde_json::json!({
            "gross_time": gross_time,
            "break_time": break_time,
            "target_time": target_minutes,
        }),
        output: serde_json::json!({
            "net_time": net_time,
            "overtime": overtime,
            "undertime": undertime,
        }),
        reasoning,
    });

    DailyCalculation {
        daily_value: DailyValue {
            employee_id,
            value_date: date,
            gross_time,
            net_time,
            target_time: target_minutes,
            break_time,
            overtime,
            undertime,
            has_error,
            warnings: breaks.warnings,
        },
        audit_steps,
    }
}

/// Calculates the daily value using a configured day plan's target time and
/// break rules.
pub fn calculate_day_with_plan(
    employee_id: Uuid,
    date: NaiveDate,
    pairs: &[BookingPair],
    plan: &DayPlan,
    has_error: bool,
) -> DailyCalculation {
    calculate_day(
        employee_id,
        date,
        pairs,
        &plan.breaks,
        plan.target_minutes,
        has_error,
        1,
    )
}
