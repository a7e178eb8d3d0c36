//! Month lifecycle state machine.
//!
//! ```text
//!            recalculate          close
//!   Open ───────────────► Calculated ─────► Closed
//!                          ▲   │  ▲            │
//!                          └───┘  └────────────┘
//!                       recalculate     reopen
//! ```
//!
//! Every operation is checked against the current state before any data is
//! aggregated or written.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::MonthlyValue;

/// Lifecycle state of one employee-month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthState {
    /// No monthly value exists yet.
    Open,
    /// A monthly value exists and may be recalculated.
    Calculated,
    /// The month is closed.
    Closed,
}

impl MonthState {
    /// Derives the state from the stored record, if any.
    pub fn of(value: Option<&MonthlyValue>) -> Self {
        match value {
            None => MonthState::Open,
            Some(v) if v.is_closed => MonthState::Closed,
            Some(_) => MonthState::Calculated,
        }
    }
}

/// An operation acting on a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthOperation {
    /// Read the stored record.
    GetSummary,
    /// Create or refresh the record.
    Recalculate,
    /// Close the month.
    Close,
    /// Reopen a closed month.
    Reopen,
}

/// Identifies the employee-month a transition is checked for, for error
/// reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthKey {
    /// The employee.
    pub employee_id: Uuid,
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: u32,
}

impl MonthKey {
    /// Creates a key.
    pub fn new(employee_id: Uuid, year: i32, month: u32) -> Self {
        Self {
            employee_id,
            year,
            month,
        }
    }

    pub(crate) fn not_found(self) -> EngineError {
        EngineError::MonthlyValueNotFound {
            employee_id: self.employee_id,
            year: self.year,
            month: self.month,
        }
    }

    pub(crate) fn closed(self) -> EngineError {
        EngineError::MonthClosed {
            employee_id: self.employee_id,
            year: self.year,
            month: self.month,
        }
    }

    pub(crate) fn not_closed(self) -> EngineError {
        EngineError::MonthNotClosed {
            employee_id: self.employee_id,
            year: self.year,
            month: self.month,
        }
    }
}

/// Checks whether `operation` is allowed in `state` and returns the state
/// the month will be in afterwards.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::{MonthKey, MonthOperation, MonthState, transition};
/// use flextime_engine::error::EngineError;
/// use uuid::Uuid;
///
/// let key = MonthKey::new(Uuid::nil(), 2026, 1);
/// assert_eq!(
///     transition(MonthState::Calculated, MonthOperation::Close, key).unwrap(),
///     MonthState::Closed
/// );
/// assert!(matches!(
///     transition(MonthState::Closed, MonthOperation::Recalculate, key),
///     Err(EngineError::MonthClosed { .. })
/// ));
/// ```
pub fn transition(
    state: MonthState,
    operation: MonthOperation,
    key: MonthKey,
) -> EngineResult<MonthState> {
    use MonthOperation::*;
    use MonthState::*;

    match (state, operation) {
        (Open, GetSummary | Close | Reopen) => Err(key.not_found()),
        (Open | Calculated, Recalculate) => Ok(Calculated),
        (Calculated, GetSummary) => Ok(Calculated),
        (Calculated, Close) => Ok(Closed),
        (Calculated, Reopen) => Err(key.not_closed()),
        (Closed, GetSummary) => Ok(Closed),
        (Closed, Recalculate | Close) => Err(key.closed()),
        (Closed, Reopen) => Ok(Calculated),
    }
}
