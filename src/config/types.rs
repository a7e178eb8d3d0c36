//! Configuration types for time evaluation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::BreakRule;

/// Metadata about the tariff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffMetadata {
    /// Short tariff code (e.g., "standard").
    pub code: String,
    /// The human-readable name of the tariff.
    pub name: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A day plan: the target time and break rules that apply to a working day.
///
/// # Example
///
/// ```
/// use flextime_engine::config::DayPlan;
///
/// let yaml = r#"
/// code: office
/// name: Office day
/// target_minutes: 480
/// breaks:
///   - type: fixed
///     start_time: 720
///     end_time: 750
///     duration: 30
/// "#;
/// let plan: DayPlan = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(plan.target_minutes, 480);
/// assert_eq!(plan.breaks.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Unique code within the tariff.
    pub code: String,
    /// The human-readable name of the day plan.
    pub name: String,
    /// Minutes the employee is expected to work.
    pub target_minutes: i32,
    /// Break rules, evaluated independently and summed.
    #[serde(default)]
    pub breaks: Vec<BreakRule>,
}

/// The complete tariff configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct TariffConfig {
    /// Tariff metadata.
    metadata: TariffMetadata,
    /// Day plans by code.
    day_plans: BTreeMap<String, DayPlan>,
}

impl TariffConfig {
    /// Creates a new TariffConfig from its component parts.
    pub fn new(metadata: TariffMetadata, day_plans: Vec<DayPlan>) -> Self {
        let day_plans = day_plans
            .into_iter()
            .map(|plan| (plan.code.clone(), plan))
            .collect();
        Self {
            metadata,
            day_plans,
        }
    }

    /// Returns the tariff metadata.
    pub fn tariff(&self) -> &TariffMetadata {
        &self.metadata
    }

    /// Returns all day plans keyed by code.
    pub fn day_plans(&self) -> &BTreeMap<String, DayPlan> {
        &self.day_plans
    }
}
