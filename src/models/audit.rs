//! Audit and warning models.
//!
//! Break deduction and daily calculation record every rule decision as an
//! [`AuditStep`] so a figure on a time sheet can be traced back to the rule
//! that produced it. Warnings flag days a supervisor may want to review.

use serde::{Deserialize, Serialize};

/// A diagnostic raised while deducting breaks.
///
/// One warning is emitted per rule instance that triggers it, so a day with
/// two automatic rules carries two `AutoBreakApplied` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakWarning {
    /// A variable or minimum rule deducted a break the employee did not book.
    AutoBreakApplied,
    /// The employee booked break time, which was deducted as recorded.
    ManualBreakRecorded,
    /// Break time was deducted although the employee booked none.
    NoBreakRecorded,
}

impl BreakWarning {
    /// Returns the stable warning code.
    ///
    /// # Example
    ///
    /// ```
    /// use flextime_engine::models::BreakWarning;
    ///
    /// assert_eq!(BreakWarning::AutoBreakApplied.code(), "AUTO_BREAK_APPLIED");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            BreakWarning::AutoBreakApplied => "AUTO_BREAK_APPLIED",
            BreakWarning::ManualBreakRecorded => "MANUAL_BREAK_RECORDED",
            BreakWarning::NoBreakRecorded => "NO_BREAK_RECORDED",
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_codes_are_distinct() {
        let codes = [
            BreakWarning::AutoBreakApplied.code(),
            BreakWarning::ManualBreakRecorded.code(),
            BreakWarning::NoBreakRecorded.code(),
        ];
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
    }

    #[test]
    fn test_warning_serialization() {
        let json = serde_json::to_string(&BreakWarning::NoBreakRecorded).unwrap();
        assert_eq!(json, "\"no_break_recorded\"");
    }

    #[test]
    fn test_audit_step_roundtrip() {
        let step = AuditStep {
            step_number: 2,
            rule_id: "fixed_break".to_string(),
            rule_name: "Fixed Break Window".to_string(),
            input: serde_json::json!({"window": "720-750"}),
            output: serde_json::json!({"deducted_minutes": 30}),
            reasoning: "work overlaps window by 30 minutes".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        let deserialized: AuditStep = serde_json::from_str(&json).unwrap();
        assert_eq!(step, deserialized);
    }
}
