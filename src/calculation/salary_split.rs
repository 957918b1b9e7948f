//! Salary split between the bank and hand portions.
//!
//! `base_salary` is the full agreed compensation and `bank_salary` the
//! registered part. The split decides the hand portion, which is the only
//! part adjusted by attendance.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The result of splitting an employee's salary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalarySplit {
    /// Unregistered portion before attendance adjustments.
    pub hand_salary: Decimal,
    /// Registered portion, passed through unchanged.
    pub bank_salary: Decimal,
    /// Salary the per-minute and per-day values are derived from.
    pub total_before_adjustments: Decimal,
    /// The audit step recording this split.
    pub audit_step: AuditStep,
}

/// Splits a salary into hand and bank portions.
///
/// - When `bank_salary > base_salary` the bank salary is treated as an
///   extra on top of the base: the total is `bank + base` and the hand
///   portion is the whole base.
/// - Otherwise the total is the base and the hand portion is `base - bank`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::split_salary;
/// use rust_decimal::Decimal;
///
/// let split = split_salary(Decimal::from(300000), Decimal::from(100000), 1);
/// assert_eq!(split.hand_salary, Decimal::from(200000));
/// assert_eq!(split.total_before_adjustments, Decimal::from(300000));
///
/// let split = split_salary(Decimal::from(200000), Decimal::from(250000), 1);
/// assert_eq!(split.hand_salary, Decimal::from(200000));
/// assert_eq!(split.total_before_adjustments, Decimal::from(450000));
/// ```
pub fn split_salary(base_salary: Decimal, bank_salary: Decimal, step_number: u32) -> SalarySplit {
    let (hand_salary, total_before_adjustments, reasoning) = if bank_salary > base_salary {
        (
            base_salary,
            bank_salary + base_salary,
            format!(
                "Bank salary {} exceeds base {}: hand = base, total = {}",
                bank_salary,
                base_salary,
                bank_salary + base_salary
            ),
        )
    } else {
        (
            base_salary - bank_salary,
            base_salary,
            format!(
                "Hand = base {} - bank {} = {}",
                base_salary,
                bank_salary,
                base_salary - bank_salary
            ),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_split".to_string(),
        rule_name: "Salary Split".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "bank_salary": bank_salary.to_string()
        }),
        output: serde_json::json!({
            "hand_salary": hand_salary.to_string(),
            "total_before_adjustments": total_before_adjustments.to_string()
        }),
        reasoning,
    };

    SalarySplit {
        hand_salary,
        bank_salary,
        total_before_adjustments,
        audit_step,
    }
}
