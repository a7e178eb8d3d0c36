//! Year and month validation and calendar arithmetic.

use chrono::{Months, NaiveDate};

use crate::error::{EngineError, EngineResult};

/// Earliest year the engine accepts.
pub const MIN_YEAR: i32 = 1900;

/// Latest year the engine accepts.
pub const MAX_YEAR: i32 = 2200;

/// Checks that the year lies in `MIN_YEAR..=MAX_YEAR`.
pub fn validate_year(year: i32) -> EngineResult<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(EngineError::InvalidYear { year })
    }
}

/// Checks the year, then that the month lies in `1..=12`.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::validate_period;
/// use flextime_engine::error::EngineError;
///
/// assert!(validate_period(2026, 1).is_ok());
/// assert!(matches!(validate_period(1899, 1), Err(EngineError::InvalidYear { year: 1899 })));
/// assert!(matches!(validate_period(2026, 13), Err(EngineError::InvalidMonth { month: 13 })));
/// ```
pub fn validate_period(year: i32, month: u32) -> EngineResult<()> {
    validate_year(year)?;
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(EngineError::InvalidMonth { month })
    }
}

/// Returns the first and last calendar day of the month.
pub fn month_range(year: i32, month: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    validate_period(year, month)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(EngineError::InvalidMonth { month })?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or(EngineError::InvalidMonth { month })?;
    Ok((first, last))
}

/// Returns the `(year, month)` immediately before the given month.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 { (year - 1, 12) } else { (year, month - 1) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_bounds_are_inclusive() {
        assert!(validate_year(1900).is_ok());
        assert!(validate_year(2200).is_ok());
        assert!(matches!(
            validate_year(1899),
            Err(EngineError::InvalidYear { year: 1899 })
        ));
        assert!(matches!(
            validate_year(2201),
            Err(EngineError::InvalidYear { year: 2201 })
        ));
    }

    #[test]
    fn test_month_zero_is_invalid() {
        assert!(matches!(
            validate_period(2026, 0),
            Err(EngineError::InvalidMonth { month: 0 })
        ));
    }

    #[test]
    fn test_year_is_checked_before_month() {
        assert!(matches!(
            validate_period(1800, 13),
            Err(EngineError::InvalidYear { .. })
        ));
    }

    #[test]
    fn test_month_range_february_leap_year() {
        let (first, last) = month_range(2028, 2).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2028, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn test_month_range_december() {
        let (first, last) = month_range(2026, 12).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2026, 12, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn test_previous_month_wraps_year() {
        assert_eq!(previous_month(2026, 1), (2025, 12));
        assert_eq!(previous_month(2026, 7), (2026, 6));
    }
}
