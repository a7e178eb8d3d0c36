//! Calculation logic for the time evaluation engine.
//!
//! This module contains the pure calculation pipeline: interval overlap,
//! break deduction, daily values, monthly aggregation with flextime
//! chaining, period validation and the month lifecycle state machine.
//! Nothing here performs I/O.

mod break_deduction;
mod daily;
mod lifecycle;
mod monthly;
mod overlap;
mod period;

pub use break_deduction::{BreakDeductionResult, deduct_breaks};
pub use daily::{DailyCalculation, calculate_day, calculate_day_with_plan};
pub use lifecycle::{MonthKey, MonthOperation, MonthState, transition};
pub use monthly::{
    AbsenceSummary, MonthCalculation, build_monthly_value, calculate_month, summarize_absences,
};
pub use overlap::overlap_minutes;
pub use period::{
    MAX_YEAR, MIN_YEAR, month_range, previous_month, validate_period, validate_year,
};
