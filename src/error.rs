//! Error types for the time evaluation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition the engine can reject: bad periods, missing or closed
//! months, configuration problems and repository failures.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the time evaluation engine.
///
/// All fallible operations in the engine return this error type. Apart from
/// [`EngineError::Repository`], every variant is a terminal application error
/// that retrying will not fix.
///
/// # Example
///
/// ```
/// use flextime_engine::error::EngineError;
///
/// let error = EngineError::InvalidMonth { month: 13 };
/// assert_eq!(error.to_string(), "Invalid month: 13 (expected 1-12)");
/// assert_eq!(error.status_hint(), 400);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The year is outside the supported range.
    #[error("Invalid year: {year} (expected 1900-2200)")]
    InvalidYear {
        /// The rejected year.
        year: i32,
    },

    /// The month is not a calendar month.
    #[error("Invalid month: {month} (expected 1-12)")]
    InvalidMonth {
        /// The rejected month.
        month: u32,
    },

    /// No monthly value has been calculated for the employee and month yet.
    #[error("Monthly value not found for employee {employee_id} in {year}-{month:02}")]
    MonthlyValueNotFound {
        /// The employee the lookup was for.
        employee_id: Uuid,
        /// The year of the month.
        year: i32,
        /// The month number.
        month: u32,
    },

    /// The month is closed and cannot be modified.
    #[error("Month {year}-{month:02} is closed for employee {employee_id}")]
    MonthClosed {
        /// The employee owning the month.
        employee_id: Uuid,
        /// The year of the month.
        year: i32,
        /// The month number.
        month: u32,
    },

    /// The month is not closed and therefore cannot be reopened.
    #[error("Month {year}-{month:02} is not closed for employee {employee_id}")]
    MonthNotClosed {
        /// The employee owning the month.
        employee_id: Uuid,
        /// The year of the month.
        year: i32,
        /// The month number.
        month: u32,
    },

    /// The employee does not exist.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The dangling employee reference.
        employee_id: Uuid,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Day plan code was not found in the configuration.
    #[error("Day plan not found: {code}")]
    DayPlanNotFound {
        /// The day plan code that was not found.
        code: String,
    },

    /// A configured break rule is inconsistent.
    #[error("Invalid break rule: {message}")]
    InvalidBreakRule {
        /// A description of what made the rule invalid.
        message: String,
    },

    /// A repository failed to load or store data.
    #[error("Repository error: {message}")]
    Repository {
        /// A description of the underlying failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true when the error was caused by the caller's input or by the
    /// state of the requested month, as opposed to an engine-side failure.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_hint())
    }

    /// Returns the HTTP status code an API layer should map this error to.
    ///
    /// The engine has no web dependency of its own; this is only a hint so
    /// every transport maps the taxonomy the same way.
    pub fn status_hint(&self) -> u16 {
        match self {
            EngineError::InvalidYear { .. }
            | EngineError::InvalidMonth { .. }
            | EngineError::InvalidBreakRule { .. } => 400,
            EngineError::MonthlyValueNotFound { .. }
            | EngineError::EmployeeNotFound { .. }
            | EngineError::DayPlanNotFound { .. } => 404,
            EngineError::MonthClosed { .. } | EngineError::MonthNotClosed { .. } => 409,
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::Repository { .. } => 500,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
