//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed rule structures that are
//! deserialized from YAML configuration files. Every `Default` mirrors the
//! shipped `config/default` directory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rules applied when turning attendance events into minute balances.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttendanceRules {
    /// Workday length assumed when an expected check-in or check-out is missing.
    pub standard_workday_minutes: i64,
    /// Minutes charged against the balance for an unjustified absence.
    pub absence_penalty_minutes: i64,
}

impl Default for AttendanceRules {
    fn default() -> Self {
        Self {
            standard_workday_minutes: 480,
            absence_penalty_minutes: 480,
        }
    }
}

/// Rules applied when aggregating a month of attendance into money.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayrollRules {
    /// Fixed month length used for the daily and per-minute salary value.
    pub days_per_month: u32,
    /// Fixed day length in hours used for the per-minute salary value.
    pub hours_per_day: u32,
    /// Multiplier applied to the minute value of extra minutes.
    pub overtime_multiplier: Decimal,
    /// Attendance bonus amount stored on newly generated records.
    pub attendance_bonus: Decimal,
    /// Concept label of the generated deduction detail line.
    pub deduction_concept: String,
    /// Concept label of the generated addition detail line.
    pub addition_concept: String,
}

impl PayrollRules {
    /// Number of salaried minutes in the fixed month.
    pub fn minutes_per_month(&self) -> Decimal {
        Decimal::from(self.days_per_month) * Decimal::from(self.hours_per_day) * Decimal::from(60)
    }
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            days_per_month: 30,
            hours_per_day: 8,
            overtime_multiplier: Decimal::new(15, 1),
            attendance_bonus: Decimal::ZERO,
            deduction_concept: "Ausencias y tardanzas".to_string(),
            addition_concept: "Horas extra".to_string(),
        }
    }
}

/// How many days of the final month a settlement pays for.
///
/// Two formulas are in use and give different numbers for the same employee;
/// which one is authoritative is still an open business question, so both are
/// kept behind this switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastMonthDays {
    /// `worked_days mod 30`, used by batch settlement generation.
    #[default]
    WholeMonthRemainder,
    /// The day-of-month of the termination date, used by recalculation.
    CalendarDayOfMonth,
}

/// Rules applied when computing a termination settlement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SettlementRules {
    /// Fixed month length used for tenure and daily rate.
    pub days_per_month: u32,
    /// Minimum tenure in days before vacation and bonus are included by default.
    pub accrual_threshold_days: i64,
    /// Last-month day formula used by batch generation.
    #[serde(default)]
    pub last_month_days: LastMonthDays,
}

impl Default for SettlementRules {
    fn default() -> Self {
        Self {
            days_per_month: 30,
            accrual_threshold_days: 20,
            last_month_days: LastMonthDays::WholeMonthRemainder,
        }
    }
}

/// The complete rule set loaded from YAML files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineRules {
    /// Attendance rules.
    pub attendance: AttendanceRules,
    /// Payroll rules.
    pub payroll: PayrollRules,
    /// Settlement rules.
    pub settlement: SettlementRules,
}
