//! Employee model and related types.
//!
//! This module defines the Employee struct and EmployeeStatus enum with
//! the fields the payroll and settlement calculations read.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether the employee currently works for the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed; included in payroll generation.
    Active,
    /// Has left; candidate for settlement generation.
    Inactive,
}

/// Represents an employee.
///
/// `base_salary` is the full agreed monthly compensation and `bank_salary`
/// the registered portion paid by bank transfer. How the two combine is
/// decided by [`crate::calculation::split_salary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Full agreed monthly salary.
    pub base_salary: Decimal,
    /// Registered portion of the salary, paid via bank.
    #[serde(default)]
    pub bank_salary: Decimal,
    /// The date the employee started employment.
    pub hire_date: NaiveDate,
    /// The last day of employment, once known.
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
    /// Current employment status.
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns true if the employee is currently active.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmployeeStatus};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ana".to_string(),
    ///     base_salary: Decimal::from(300000),
    ///     bank_salary: Decimal::from(100000),
    ///     hire_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    ///     termination_date: None,
    ///     status: EmployeeStatus::Active,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_active_employee() {
        let json = r#"{
            "id": "emp_001",
            "name": "Ana",
            "base_salary": "300000",
            "bank_salary": "100000",
            "hire_date": "2023-06-01",
            "status": "active"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.base_salary, Decimal::from(300000));
        assert_eq!(employee.bank_salary, Decimal::from(100000));
        assert_eq!(employee.termination_date, None);
        assert!(employee.is_active());
    }

    #[test]
    fn test_deserialize_inactive_employee_with_termination() {
        let json = r#"{
            "id": "emp_002",
            "base_salary": "250000.50",
            "hire_date": "2020-01-15",
            "termination_date": "2025-03-10",
            "status": "inactive"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.base_salary, Decimal::from_str("250000.50").unwrap());
        assert_eq!(employee.bank_salary, Decimal::ZERO);
        assert_eq!(
            employee.termination_date,
            Some(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
        );
        assert!(!employee.is_active());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&EmployeeStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&EmployeeStatus::Inactive).unwrap(),
            "\"inactive\""
        );
    }
}
