//! Core data models for the time evaluation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod absence;
mod audit;
mod booking;
mod break_rule;
mod daily_value;
mod monthly_value;

pub use absence::{AbsenceCategory, AbsenceDay, AbsenceStatus};
pub use audit::{AuditStep, BreakWarning};
pub use booking::{BookingPair, PairCategory, total_minutes};
pub use break_rule::{BreakRule, FixedBreak, MINUTES_PER_DAY, MinimumBreak, VariableBreak};
pub use daily_value::DailyValue;
pub use monthly_value::MonthlyValue;
