//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tariff
//! configurations from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::MINUTES_PER_DAY;

use super::types::{DayPlan, TariffConfig, TariffMetadata};

/// Loads and provides access to tariff configuration.
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// ├── tariff.yaml          # Tariff metadata
/// └── day_plans/
///     ├── office.yaml      # One day plan per file
///     └── flex.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use flextime_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard")?;
/// let plan = loader.get_day_plan("office")?;
/// println!("{}: {} minutes", plan.name, plan.target_minutes);
/// # Ok::<(), flextime_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TariffConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if:
    /// - `tariff.yaml` or the `day_plans` directory is missing
    /// - Any file contains invalid YAML
    /// - The directory holds no day plans, or two plans share a code
    /// - A day plan has an impossible target or break rule
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TariffMetadata>(&path.join("tariff.yaml"))?;
        let day_plans = Self::load_day_plans(&path.join("day_plans"))?;

        Ok(Self {
            config: TariffConfig::new(metadata, day_plans),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates all day plan files.
    fn load_day_plans(dir: &Path) -> EngineResult<Vec<DayPlan>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        // read_dir order is platform dependent
        paths.sort();

        let mut plans = Vec::with_capacity(paths.len());
        let mut codes = HashSet::new();
        for path in paths {
            let plan = Self::load_yaml::<DayPlan>(&path)?;
            Self::validate_day_plan(&plan)?;
            if !codes.insert(plan.code.clone()) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate day plan code '{}'", plan.code),
                });
            }
            plans.push(plan);
        }

        if plans.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no day plan files found)", dir_str),
            });
        }

        Ok(plans)
    }

    fn validate_day_plan(plan: &DayPlan) -> EngineResult<()> {
        if !(0..=MINUTES_PER_DAY).contains(&plan.target_minutes) {
            return Err(EngineError::InvalidBreakRule {
                message: format!(
                    "day plan '{}' has target of {} minutes",
                    plan.code, plan.target_minutes
                ),
            });
        }
        plan.breaks.iter().try_for_each(|rule| rule.validate())
    }

    /// Returns the underlying tariff configuration.
    pub fn config(&self) -> &TariffConfig {
        &self.config
    }

    /// Returns the tariff metadata.
    pub fn tariff(&self) -> &TariffMetadata {
        self.config.tariff()
    }

    /// Gets a day plan by its code.
    pub fn get_day_plan(&self, code: &str) -> EngineResult<&DayPlan> {
        self.config
            .day_plans()
            .get(code)
            .ok_or_else(|| EngineError::DayPlanNotFound {
                code: code.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BreakRule;
    use std::path::PathBuf;

    const CONFIG_PATH: &str = "./config/standard";

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "flextime-engine-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(dir.join("day_plans")).unwrap();
        fs::write(dir.join("tariff.yaml"), "code: test\nname: Test tariff\n").unwrap();
        dir
    }

    #[test]
    fn test_load_standard_config() {
        let loader = ConfigLoader::load(CONFIG_PATH).unwrap();
        assert_eq!(loader.tariff().code, "standard");
        assert_eq!(loader.config().day_plans().len(), 3);
    }

    #[test]
    fn test_office_plan_has_fixed_lunch_window() {
        let loader = ConfigLoader::load(CONFIG_PATH).unwrap();
        let plan = loader.get_day_plan("office").unwrap();
        assert_eq!(plan.target_minutes, 480);
        assert!(matches!(plan.breaks[0], BreakRule::Fixed(_)));
    }

    #[test]
    fn test_unknown_day_plan() {
        let loader = ConfigLoader::load(CONFIG_PATH).unwrap();
        let err = loader.get_day_plan("night").unwrap_err();
        assert!(matches!(err, EngineError::DayPlanNotFound { code } if code == "night"));
    }

    #[test]
    fn test_missing_directory() {
        let err = ConfigLoader::load("./config/does-not-exist").unwrap_err();
        assert!(matches!(err, EngineError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_empty_day_plan_directory() {
        let dir = scratch_dir("empty");
        let err = ConfigLoader::load(&dir).unwrap_err();
        assert!(err.to_string().contains("no day plan files found"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        let dir = scratch_dir("invalid");
        fs::write(dir.join("day_plans/bad.yaml"), "code: [unclosed\n").unwrap();
        let err = ConfigLoader::load(&dir).unwrap_err();
        assert!(matches!(err, EngineError::ConfigParseError { .. }));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_inverted_fixed_window_is_rejected() {
        let dir = scratch_dir("inverted");
        fs::write(
            dir.join("day_plans/late.yaml"),
            "code: late\nname: Late\ntarget_minutes: 480\nbreaks:\n  - type: fixed\n    start_time: 750\n    end_time: 720\n    duration: 30\n",
        )
        .unwrap();
        let err = ConfigLoader::load(&dir).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBreakRule { .. }));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_duplicate_codes_are_rejected() {
        let dir = scratch_dir("duplicate");
        let plan = "code: same\nname: Same\ntarget_minutes: 480\n";
        fs::write(dir.join("day_plans/a.yaml"), plan).unwrap();
        fs::write(dir.join("day_plans/b.yaml"), plan).unwrap();
        let err = ConfigLoader::load(&dir).unwrap_err();
        assert!(err.to_string().contains("duplicate day plan code"));
        fs::remove_dir_all(dir).unwrap();
    }
}
