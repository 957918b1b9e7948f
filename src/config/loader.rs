//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine rules
//! from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AttendanceRules, EngineRules, PayrollRules, SettlementRules};

/// Loads and provides access to engine rules.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── attendance.yaml  # Workday length and absence penalty
/// ├── payroll.yaml     # Minute value denominator, overtime multiplier, detail labels
/// └── settlement.yaml  # Accrual threshold and last-month day strategy
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Overtime multiplier: {}", loader.rules().payroll.overtime_multiplier);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    rules: EngineRules,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any of the three files is missing or does not
    /// deserialize into its rule type.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let attendance = Self::load_yaml::<AttendanceRules>(&path.join("attendance.yaml"))?;
        let payroll = Self::load_yaml::<PayrollRules>(&path.join("payroll.yaml"))?;
        let settlement = Self::load_yaml::<SettlementRules>(&path.join("settlement.yaml"))?;

        Self::validate(&payroll, &settlement, path)?;

        Ok(Self {
            rules: EngineRules {
                attendance,
                payroll,
                settlement,
            },
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

    // Zero denominators would turn every division in the calculators into a panic.
    fn validate(payroll: &PayrollRules, settlement: &SettlementRules, dir: &Path) -> EngineResult<()> {
        if payroll.days_per_month == 0 || payroll.hours_per_day == 0 {
            return Err(EngineError::ConfigParseError {
                path: dir.join("payroll.yaml").display().to_string(),
                message: "days_per_month and hours_per_day must be positive".to_string(),
            });
        }
        if settlement.days_per_month == 0 {
            return Err(EngineError::ConfigParseError {
                path: dir.join("settlement.yaml").display().to_string(),
                message: "days_per_month must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Wraps an already-built rule set.
    pub fn from_rules(rules: EngineRules) -> Self {
        Self { rules }
    }

    /// Returns the loaded rules.
    pub fn rules(&self) -> &EngineRules {
        &self.rules
    }

    /// Consumes the loader, returning the rules.
    pub fn into_rules(self) -> EngineRules {
        self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LastMonthDays;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
    }

    #[test]
    fn test_shipped_configuration_matches_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.rules(), &EngineRules::default());
    }

    #[test]
    fn test_payroll_rules_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let payroll = &loader.rules().payroll;

        assert_eq!(payroll.days_per_month, 30);
        assert_eq!(payroll.hours_per_day, 8);
        assert_eq!(payroll.overtime_multiplier, dec("1.5"));
        assert_eq!(payroll.deduction_concept, "Ausencias y tardanzas");
        assert_eq!(payroll.addition_concept, "Horas extra");
    }

    #[test]
    fn test_settlement_rules_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let settlement = &loader.rules().settlement;

        assert_eq!(settlement.accrual_threshold_days, 20);
        assert_eq!(settlement.last_month_days, LastMonthDays::WholeMonthRemainder);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("attendance.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_loader_uses_default_rules() {
        let loader = ConfigLoader::default();
        assert_eq!(loader.into_rules(), EngineRules::default());
    }
}
