//! Configuration loading and management for the payroll engine.
//!
//! This module loads the business rules (workday length, minute value
//! denominator, overtime multiplier, settlement thresholds) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Accrual threshold: {} days", config.rules().settlement.accrual_threshold_days);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AttendanceRules, EngineRules, LastMonthDays, PayrollRules, SettlementRules};
