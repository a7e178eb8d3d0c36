//! Break deduction functionality.
//!
//! This module applies a day plan's break rules to the booked work and break
//! time of one day. Rules are evaluated independently and their deductions
//! are summed:
//!
//! - **Fixed**: work overlapping the rule's clock window is deducted, capped
//!   at the rule duration. Always applies, even when a break was booked.
//! - **Variable**: deducts its full duration only if no break was booked.
//! - **Minimum**: deducts once gross work reaches the threshold, optionally
//!   only the minutes beyond the threshold.
//!
//! Booked break time is added on top of the rule deductions. With no rules
//! at all, the booked break time is deducted as is.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    AuditStep, BookingPair, BreakRule, BreakWarning, FixedBreak, MinimumBreak, VariableBreak,
};

use super::overlap_minutes;

/// The result of deducting breaks for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakDeductionResult {
    /// Total minutes to deduct from gross work time.
    pub deducted_minutes: i32,
    /// Warnings in the order they were raised.
    pub warnings: Vec<BreakWarning>,
    /// One audit step per evaluated rule, followed by the booked-break step.
    pub audit_steps: Vec<AuditStep>,
}

/// Deducts breaks for one day.
///
/// # Arguments
///
/// * `pairs` - The day's booking pairs; incomplete pairs are ignored
/// * `recorded_break_minutes` - Break time the employee booked
/// * `gross_work_minutes` - Sum of the day's complete work pairs
/// * `rules` - Break rules of the day plan, in configuration order
/// * `step_number` - The step number of the first audit step
///
/// # Examples
///
/// ## Fixed window plus a booked break
///
/// ```
/// use flextime_engine::calculation::deduct_breaks;
/// use flextime_engine::models::{BookingPair, BreakRule, BreakWarning, FixedBreak, PairCategory};
///
/// let pairs = vec![BookingPair::new(480, 1020, PairCategory::Work)];
/// let rules = vec![BreakRule::Fixed(FixedBreak {
///     start_time: Some(720),
///     end_time: Some(750),
///     duration: 30,
/// })];
///
/// let result = deduct_breaks(&pairs, 45, 540, &rules, 1);
/// assert_eq!(result.deducted_minutes, 75);
/// assert_eq!(result.warnings, vec![BreakWarning::ManualBreakRecorded]);
/// ```
///
/// ## No rules configured
///
/// ```
/// use flextime_engine::calculation::deduct_breaks;
///
/// let result = deduct_breaks(&[], 20, 480, &[], 1);
/// assert_eq!(result.deducted_minutes, 20);
/// assert!(result.warnings.is_empty());
/// ```
pub fn deduct_breaks(
    pairs: &[BookingPair],
    recorded_break_minutes: i32,
    gross_work_minutes: i32,
    rules: &[BreakRule],
    step_number: u32,
) -> BreakDeductionResult {
    if rules.is_empty() {
        let audit_step = AuditStep {
            step_number,
            rule_id: "recorded_break".to_string(),
            rule_name: "Recorded Break Pass-Through".to_string(),
            input: serde_json::json!({ "recorded_break_minutes": recorded_break_minutes }),
            output: serde_json::json!({ "deducted_minutes": recorded_break_minutes }),
            reasoning: "No break rules configured, booked break time deducted as recorded"
                .to_string(),
        };
        return BreakDeductionResult {
            deducted_minutes: recorded_break_minutes,
            warnings: vec![],
            audit_steps: vec![audit_step],
        };
    }

    let mut deducted_minutes = 0;
    let mut warnings = Vec::new();
    let mut audit_steps = Vec::with_capacity(rules.len() + 1);
    let mut step = step_number;

    for rule in rules {
        let outcome = match rule {
            BreakRule::Fixed(fixed) => evaluate_fixed(fixed, pairs),
            BreakRule::Variable(variable) => {
                evaluate_variable(variable, recorded_break_minutes, gross_work_minutes)
            }
            BreakRule::Minimum(minimum) => {
                evaluate_minimum(minimum, recorded_break_minutes, gross_work_minutes)
            }
        };

        debug!(
            rule = rule.kind(),
            deducted = outcome.minutes,
            auto_applied = outcome.auto_applied,
            "Evaluated break rule"
        );

        deducted_minutes += outcome.minutes;
        if outcome.auto_applied {
            warnings.push(BreakWarning::AutoBreakApplied);
        }
        audit_steps.push(AuditStep {
            step_number: step,
            rule_id: format!("{}_break", rule.kind()),
            rule_name: outcome.rule_name.to_string(),
            input: serde_json::json!({
                "rule": rule,
                "recorded_break_minutes": recorded_break_minutes,
                "gross_work_minutes": gross_work_minutes,
            }),
            output: serde_json::json!({ "deducted_minutes": outcome.minutes }),
            reasoning: outcome.reasoning,
        });
        step += 1;
    }

    let rule_minutes = deducted_minutes;
    let reasoning = if recorded_break_minutes > 0 {
        deducted_minutes += recorded_break_minutes;
        warnings.push(BreakWarning::ManualBreakRecorded);
        format!(
            "{} booked break minutes added to {} rule minutes",
            recorded_break_minutes, rule_minutes
        )
    } else if deducted_minutes > 0 {
        warnings.push(BreakWarning::NoBreakRecorded);
        format!(
            "No break booked, {} minutes deducted by rules",
            deducted_minutes
        )
    } else {
        "No break booked and no rule deducted time".to_string()
    };

    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "recorded_break".to_string(),
        rule_name: "Recorded Break".to_string(),
        input: serde_json::json!({
            "recorded_break_minutes": recorded_break_minutes,
            "rule_minutes": rule_minutes,
        }),
        output: serde_json::json!({ "deducted_minutes": deducted_minutes }),
        reasoning,
    });

    BreakDeductionResult {
        deducted_minutes,
        warnings,
        audit_steps,
    }
}

struct RuleOutcome {
    minutes: i32,
    auto_applied: bool,
    rule_name: &'static str,
    reasoning: String,
}

fn evaluate_fixed(rule: &FixedBreak, pairs: &[BookingPair]) -> RuleOutcome {
    let rule_name = "Fixed Break Window";
    let (Some(window_start), Some(window_end)) = (rule.start_time, rule.end_time) else {
        return RuleOutcome {
            minutes: 0,
            auto_applied: false,
            rule_name,
            reasoning: "Fixed break has no complete window, nothing deducted".to_string(),
        };
    };

    // Summed per pair before capping so split days count every overlap
    let overlap: i32 = pairs
        .iter()
        .filter(|p| p.is_work())
        .filter_map(BookingPair::bounds)
        .map(|(start, end)| overlap_minutes(start, end, window_start, window_end))
        .sum();
    let minutes = overlap.min(rule.duration);

    RuleOutcome {
        minutes,
        auto_applied: false,
        rule_name,
        reasoning: format!(
            "Work overlaps window {}-{} by {} minutes, deducting {} (cap {})",
            window_start, window_end, overlap, minutes, rule.duration
        ),
    }
}

fn evaluate_variable(
    rule: &VariableBreak,
    recorded_break_minutes: i32,
    gross_work_minutes: i32,
) -> RuleOutcome {
    let rule_name = "Variable Break";
    let threshold_met = rule
        .after_work_minutes
        .is_none_or(|threshold| gross_work_minutes >= threshold);

    let reasoning = if recorded_break_minutes > 0 {
        "Break was booked, variable break suppressed".to_string()
    } else if !rule.auto_deduct {
        "Automatic deduction disabled".to_string()
    } else if !threshold_met {
        format!(
            "{} gross minutes below threshold of {}",
            gross_work_minutes,
            rule.after_work_minutes.unwrap_or_default()
        )
    } else {
        return RuleOutcome {
            minutes: rule.duration,
            auto_applied: true,
            rule_name,
            reasoning: format!("No break booked, deducting {} minutes", rule.duration),
        };
    };

    RuleOutcome {
        minutes: 0,
        auto_applied: false,
        rule_name,
        reasoning,
    }
}

fn evaluate_minimum(
    rule: &MinimumBreak,
    recorded_break_minutes: i32,
    gross_work_minutes: i32,
) -> RuleOutcome {
    let rule_name = "Minimum Break";
    let Some(threshold) = rule.after_work_minutes else {
        return RuleOutcome {
            minutes: 0,
            auto_applied: false,
            rule_name,
            reasoning: "Minimum break has no threshold, nothing deducted".to_string(),
        };
    };

    if !rule.auto_deduct {
        return RuleOutcome {
            minutes: 0,
            auto_applied: false,
            rule_name,
            reasoning: "Automatic deduction disabled".to_string(),
        };
    }

    if gross_work_minutes < threshold {
        return RuleOutcome {
            minutes: 0,
            auto_applied: false,
            rule_name,
            reasoning: format!(
                "{} gross minutes below threshold of {}",
                gross_work_minutes, threshold
            ),
        };
    }

    let (minutes, reasoning) = if rule.minutes_difference {
        let overage = gross_work_minutes - threshold;
        let minutes = overage.min(rule.duration);
        (
            minutes,
            format!(
                "{} minutes worked beyond threshold of {}, deducting {} (cap {})",
                overage, threshold, minutes, rule.duration
            ),
        )
    } else {
        (
            rule.duration,
            format!(
                "{} gross minutes reach threshold of {}, deducting {}",
                gross_work_minutes, threshold, rule.duration
            ),
        )
    };

    RuleOutcome {
        minutes,
        auto_applied: recorded_break_minutes == 0,
        rule_name,
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PairCategory;
    use proptest::prelude::*;
    use rstest::rstest;

    fn work(start: i32, end: i32) -> BookingPair {
        BookingPair::new(start, end, PairCategory::Work)
    }

    fn fixed(start: i32, end: i32, duration: i32) -> BreakRule {
        BreakRule::Fixed(FixedBreak {
            start_time: Some(start),
            end_time: Some(end),
            duration,
        })
    }

    fn variable(duration: i32, after: Option<i32>, auto_deduct: bool) -> BreakRule {
        BreakRule::Variable(VariableBreak {
            duration,
            after_work_minutes: after,
            auto_deduct,
        })
    }

    fn minimum(duration: i32, after: Option<i32>, minutes_difference: bool) -> BreakRule {
        BreakRule::Minimum(MinimumBreak {
            duration,
            after_work_minutes: after,
            auto_deduct: true,
            minutes_difference,
        })
    }

    // ==========================================================================
    // No rules: booked break passes through
    // ==========================================================================
    #[test]
    fn test_no_rules_passes_recorded_break_through() {
        let result = deduct_breaks(&[work(480, 1020)], 35, 540, &[], 1);
        assert_eq!(result.deducted_minutes, 35);
        assert!(result.warnings.is_empty());
        assert_eq!(result.audit_steps.len(), 1);
        assert_eq!(result.audit_steps[0].rule_id, "recorded_break");
    }

    #[test]
    fn test_no_rules_and_no_break_deducts_nothing() {
        let result = deduct_breaks(&[work(480, 1020)], 0, 540, &[], 1);
        assert_eq!(result.deducted_minutes, 0);
        assert!(result.warnings.is_empty());
    }

    // ==========================================================================
    // Fixed breaks
    // ==========================================================================
    #[test]
    fn test_fixed_window_deducted_without_booking() {
        let result = deduct_breaks(&[work(480, 1020)], 0, 540, &[fixed(720, 750, 30)], 1);
        assert_eq!(result.deducted_minutes, 30);
        assert_eq!(result.warnings, vec![BreakWarning::NoBreakRecorded]);
    }

    #[test]
    fn test_fixed_window_is_additive_with_manual_break() {
        let result = deduct_breaks(&[work(480, 1020)], 45, 540, &[fixed(720, 750, 30)], 1);
        assert_eq!(result.deducted_minutes, 75);
        assert_eq!(result.warnings, vec![BreakWarning::ManualBreakRecorded]);
    }

    #[test]
    fn test_fixed_window_on_split_day_sums_overlaps_before_cap() {
        // 08:00-12:10 and 12:20-17:00 against a 12:00-12:30 window
        let pairs = vec![work(480, 730), work(740, 1020)];
        let result = deduct_breaks(&pairs, 0, 530, &[fixed(720, 750, 30)], 1);
        // 10 + 10 minutes of overlap, below the cap
        assert_eq!(result.deducted_minutes, 20);
    }

    #[test]
    fn test_fixed_window_caps_at_duration() {
        // 60 minute window but only 30 minutes deductible
        let result = deduct_breaks(&[work(480, 1020)], 0, 540, &[fixed(720, 780, 30)], 1);
        assert_eq!(result.deducted_minutes, 30);
    }

    #[test]
    fn test_fixed_window_without_work_pairs_deducts_zero() {
        let breaks_only = vec![BookingPair::new(720, 750, PairCategory::Break)];
        let result = deduct_breaks(&breaks_only, 30, 0, &[fixed(720, 750, 30)], 1);
        assert_eq!(result.deducted_minutes, 30);
        assert_eq!(result.audit_steps[0].output["deducted_minutes"], 0);
    }

    #[test]
    fn test_fixed_window_ignores_incomplete_pairs() {
        let pairs = vec![BookingPair {
            start: Some(480),
            end: None,
            category: PairCategory::Work,
        }];
        let result = deduct_breaks(&pairs, 0, 0, &[fixed(720, 750, 30)], 1);
        assert_eq!(result.deducted_minutes, 0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_fixed_without_window_deducts_zero() {
        let rule = BreakRule::Fixed(FixedBreak {
            start_time: Some(720),
            end_time: None,
            duration: 30,
        });
        let result = deduct_breaks(&[work(480, 1020)], 0, 540, &[rule], 1);
        assert_eq!(result.deducted_minutes, 0);
    }

    // ==========================================================================
    // Variable breaks
    // ==========================================================================
    #[test]
    fn test_variable_fires_without_booking() {
        let result = deduct_breaks(
            &[work(480, 1020)],
            0,
            540,
            &[variable(30, Some(300), true)],
            1,
        );
        assert_eq!(result.deducted_minutes, 30);
        assert_eq!(
            result.warnings,
            vec![BreakWarning::AutoBreakApplied, BreakWarning::NoBreakRecorded]
        );
    }

    #[test]
    fn test_variable_suppressed_by_manual_break() {
        let result = deduct_breaks(
            &[work(480, 1020)],
            30,
            540,
            &[variable(30, Some(300), true)],
            1,
        );
        assert_eq!(result.deducted_minutes, 30);
        assert_eq!(result.warnings, vec![BreakWarning::ManualBreakRecorded]);
    }

    #[rstest]
    #[case::below_threshold(Some(300), true, 299, 0)]
    #[case::at_threshold(Some(300), true, 300, 30)]
    #[case::no_threshold(None, true, 10, 30)]
    #[case::auto_deduct_off(Some(300), false, 540, 0)]
    fn test_variable_gates(
        #[case] after: Option<i32>,
        #[case] auto_deduct: bool,
        #[case] gross: i32,
        #[case] expected: i32,
    ) {
        let result = deduct_breaks(&[], 0, gross, &[variable(30, after, auto_deduct)], 1);
        assert_eq!(result.deducted_minutes, expected);
    }

    // ==========================================================================
    // Minimum breaks
    // ==========================================================================
    #[rstest]
    #[case::just_over_threshold(310, 10)]
    #[case::capped(360, 30)]
    #[case::below_threshold(299, 0)]
    #[case::at_threshold(300, 0)]
    fn test_minimum_proportional(#[case] gross: i32, #[case] expected: i32) {
        let result = deduct_breaks(&[], 0, gross, &[minimum(30, Some(300), true)], 1);
        assert_eq!(result.deducted_minutes, expected);
    }

    #[test]
    fn test_minimum_full_duration_once_threshold_reached() {
        let result = deduct_breaks(&[], 0, 310, &[minimum(30, Some(300), false)], 1);
        assert_eq!(result.deducted_minutes, 30);
        assert_eq!(
            result.warnings,
            vec![BreakWarning::AutoBreakApplied, BreakWarning::NoBreakRecorded]
        );
    }

    #[test]
    fn test_minimum_without_threshold_never_fires() {
        let result = deduct_breaks(&[], 0, 600, &[minimum(30, None, false)], 1);
        assert_eq!(result.deducted_minutes, 0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_minimum_fires_alongside_manual_break_without_auto_warning() {
        let result = deduct_breaks(&[], 15, 400, &[minimum(30, Some(360), false)], 1);
        assert_eq!(result.deducted_minutes, 45);
        assert_eq!(result.warnings, vec![BreakWarning::ManualBreakRecorded]);
    }

    #[test]
    fn test_minimum_disabled_auto_deduct() {
        let rule = BreakRule::Minimum(MinimumBreak {
            duration: 30,
            after_work_minutes: Some(300),
            auto_deduct: false,
            minutes_difference: false,
        });
        let result = deduct_breaks(&[], 0, 600, &[rule], 1);
        assert_eq!(result.deducted_minutes, 0);
    }

    // ==========================================================================
    // Mixed rule sets
    // ==========================================================================
    #[test]
    fn test_mixed_rules_are_summed_with_warning_per_rule() {
        let rules = vec![
            fixed(720, 750, 30),
            minimum(15, Some(540), false),
            minimum(15, Some(600), false),
        ];
        let result = deduct_breaks(&[work(420, 1080)], 0, 660, &rules, 1);
        assert_eq!(result.deducted_minutes, 60);
        assert_eq!(
            result.warnings,
            vec![
                BreakWarning::AutoBreakApplied,
                BreakWarning::AutoBreakApplied,
                BreakWarning::NoBreakRecorded,
            ]
        );
    }

    #[test]
    fn test_rule_order_does_not_change_total() {
        let pairs = vec![work(480, 1020)];
        let mut rules = vec![
            fixed(720, 750, 30),
            variable(20, None, true),
            minimum(30, Some(300), true),
        ];
        let forward = deduct_breaks(&pairs, 0, 540, &rules, 1);
        rules.reverse();
        let backward = deduct_breaks(&pairs, 0, 540, &rules, 1);
        assert_eq!(forward.deducted_minutes, backward.deducted_minutes);
        assert_eq!(forward.deducted_minutes, 80);
    }

    #[test]
    fn test_audit_steps_are_numbered_from_step_number() {
        let rules = vec![fixed(720, 750, 30), variable(30, None, true)];
        let result = deduct_breaks(&[work(480, 1020)], 0, 540, &rules, 4);
        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![4, 5, 6]);
        assert_eq!(result.audit_steps[0].rule_id, "fixed_break");
        assert_eq!(result.audit_steps[1].rule_id, "variable_break");
        assert_eq!(result.audit_steps[2].rule_id, "recorded_break");
    }

    #[test]
    fn test_manual_break_longer_than_work_is_not_clamped() {
        let result = deduct_breaks(&[work(480, 600)], 200, 120, &[fixed(720, 750, 30)], 1);
        assert_eq!(result.deducted_minutes, 200);
    }

    proptest! {
        #[test]
        fn prop_deduction_never_negative(
            recorded in 0i32..300,
            gross in 0i32..900,
            duration in 0i32..90,
            after in 0i32..600,
        ) {
            let rules = vec![
                fixed(720, 750, duration),
                variable(duration, Some(after), true),
                minimum(duration, Some(after), true),
            ];
            let result = deduct_breaks(&[work(480, 1020)], recorded, gross, &rules, 1);
            prop_assert!(result.deducted_minutes >= recorded);
        }

        #[test]
        fn prop_without_rules_deduction_equals_recorded(recorded in 0i32..600, gross in 0i32..900) {
            let result = deduct_breaks(&[], recorded, gross, &[], 1);
            prop_assert_eq!(result.deducted_minutes, recorded);
        }
    }
}
