//! Break rule models.
//!
//! A day plan carries any number of break rules of mixed kinds. Each kind is
//! its own variant of [`BreakRule`] holding only the fields that kind uses,
//! so the deduction engine dispatches by pattern matching.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Last minute of a day, as minutes from midnight.
pub const MINUTES_PER_DAY: i32 = 1440;

/// A break tied to a clock-time window.
///
/// Work overlapping the window is deducted up to `duration`, regardless of
/// any break the employee booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedBreak {
    /// Window start in minutes from midnight.
    #[serde(default)]
    pub start_time: Option<i32>,
    /// Window end in minutes from midnight.
    #[serde(default)]
    pub end_time: Option<i32>,
    /// Maximum minutes deducted for this window.
    pub duration: i32,
}

/// A break deducted automatically only when no break was booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableBreak {
    /// Minutes deducted when the rule fires.
    pub duration: i32,
    /// Gross work minutes required before the rule fires, if any.
    #[serde(default)]
    pub after_work_minutes: Option<i32>,
    /// Whether the rule may fire without a booking.
    #[serde(default)]
    pub auto_deduct: bool,
}

/// A break enforced once worked time crosses a threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumBreak {
    /// Minutes deducted when the rule fires (the cap when prorated).
    pub duration: i32,
    /// Gross work minutes at which the rule starts to apply.
    #[serde(default)]
    pub after_work_minutes: Option<i32>,
    /// Whether the rule may fire without a booking.
    #[serde(default)]
    pub auto_deduct: bool,
    /// Deduct only the minutes worked beyond the threshold, capped at
    /// `duration`, instead of the whole duration.
    #[serde(default)]
    pub minutes_difference: bool,
}

/// One configured break rule.
///
/// # Example
///
/// ```
/// use flextime_engine::models::{BreakRule, FixedBreak};
///
/// let yaml = "type: fixed\nstart_time: 720\nend_time: 750\nduration: 30\n";
/// let rule: BreakRule = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(
///     rule,
///     BreakRule::Fixed(FixedBreak {
///         start_time: Some(720),
///         end_time: Some(750),
///         duration: 30,
///     })
/// );
/// assert_eq!(rule.kind(), "fixed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BreakRule {
    /// Clock-window break.
    Fixed(FixedBreak),
    /// Break applied only when nothing was booked.
    Variable(VariableBreak),
    /// Threshold-driven statutory break.
    Minimum(MinimumBreak),
}

impl BreakRule {
    /// Returns the rule kind as used in configuration files.
    pub fn kind(&self) -> &'static str {
        match self {
            BreakRule::Fixed(_) => "fixed",
            BreakRule::Variable(_) => "variable",
            BreakRule::Minimum(_) => "minimum",
        }
    }

    /// Returns the configured duration of the rule.
    pub fn duration(&self) -> i32 {
        match self {
            BreakRule::Fixed(rule) => rule.duration,
            BreakRule::Variable(rule) => rule.duration,
            BreakRule::Minimum(rule) => rule.duration,
        }
    }

    /// Checks the rule for values no day plan could mean.
    ///
    /// A fixed rule without a window is accepted (it simply never deducts),
    /// but a window that is present must lie within the day and have
    /// `end > start`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.duration() < 0 {
            return Err(EngineError::InvalidBreakRule {
                message: format!(
                    "{} break has negative duration {}",
                    self.kind(),
                    self.duration()
                ),
            });
        }

        match self {
            BreakRule::Fixed(rule) => {
                for time in [rule.start_time, rule.end_time].into_iter().flatten() {
                    if !(0..=MINUTES_PER_DAY).contains(&time) {
                        return Err(EngineError::InvalidBreakRule {
                            message: format!("fixed break time {} is outside 0-1440", time),
                        });
                    }
                }
                if let (Some(start), Some(end)) = (rule.start_time, rule.end_time) {
                    if end <= start {
                        return Err(EngineError::InvalidBreakRule {
                            message: format!(
                                "fixed break window ends at {} before it starts at {}",
                                end, start
                            ),
                        });
                    }
                }
            }
            BreakRule::Variable(VariableBreak {
                after_work_minutes, ..
            })
            | BreakRule::Minimum(MinimumBreak {
                after_work_minutes, ..
            }) => {
                if let Some(threshold) = after_work_minutes {
                    if *threshold < 0 {
                        return Err(EngineError::InvalidBreakRule {
                            message: format!(
                                "{} break has negative threshold {}",
                                self.kind(),
                                threshold
                            ),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
