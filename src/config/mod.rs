//! Configuration loading and management for the time evaluation engine.
//!
//! This module loads tariff configurations from YAML files: tariff metadata
//! and the day plans that define target times and break rules.
//!
//! # Example
//!
//! ```no_run
//! use flextime_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Loaded tariff: {}", config.tariff().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DayPlan, TariffConfig, TariffMetadata};
