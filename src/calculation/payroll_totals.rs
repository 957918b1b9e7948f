//! Derived totals of a payroll record.
//!
//! `final_hand_salary` and `total_salary` are never edited directly; they
//! are recomputed from the other fields whenever any of them changes.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PayrollRecord};

use super::money::round_money;

/// The derived totals of a payroll record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollTotals {
    /// `hand - deductions + additions + bonus (when granted)`.
    pub final_hand_salary: Decimal,
    /// `final_hand_salary + bank_salary`.
    pub total_salary: Decimal,
    /// The audit step recording the calculation.
    pub audit_step: AuditStep,
}

/// Calculates the derived totals from a record's source fields.
///
/// The record's current `final_hand_salary` and `total_salary` are ignored.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_payroll_totals;
/// # use payroll_engine::models::PayrollRecord;
/// # use rust_decimal::Decimal;
/// # use std::str::FromStr;
/// # use uuid::Uuid;
/// # let dec = |s: &str| Decimal::from_str(s).unwrap();
/// # let record = PayrollRecord {
/// #     id: Uuid::nil(), employee_id: "emp_001".into(), month: 3, year: 2025,
/// #     base_salary: dec("300000"), bank_salary: dec("100000"), hand_salary: dec("200000"),
/// #     deductions: dec("208.33"), additions: dec("0"),
/// #     has_attendance_bonus: false, attendance_bonus: dec("0"),
/// #     final_hand_salary: dec("0"), total_salary: dec("0"),
/// #     is_paid_hand: false, hand_payment_date: None, is_paid_bank: false,
/// #     bank_payment_date: None, is_paid: false, payment_method: None,
/// #     payment_reference: None, payment_date: None,
/// # };
/// let totals = calculate_payroll_totals(&record, 1);
/// assert_eq!(totals.final_hand_salary, dec("199791.67"));
/// assert_eq!(totals.total_salary, dec("299791.67"));
/// ```
pub fn calculate_payroll_totals(record: &PayrollRecord, step_number: u32) -> PayrollTotals {
    let bonus = if record.has_attendance_bonus {
        record.attendance_bonus
    } else {
        Decimal::ZERO
    };

    let final_hand_salary =
        round_money(record.hand_salary - record.deductions + record.additions + bonus);
    let total_salary = round_money(final_hand_salary + record.bank_salary);

    let audit_step = AuditStep {
        step_number,
        rule_id: "payroll_totals".to_string(),
        rule_name: "Payroll Totals".to_string(),
        input: serde_json::json!({
            "hand_salary": record.hand_salary.to_string(),
            "deductions": record.deductions.to_string(),
            "additions": record.additions.to_string(),
            "has_attendance_bonus": record.has_attendance_bonus,
            "attendance_bonus": record.attendance_bonus.to_string(),
            "bank_salary": record.bank_salary.to_string()
        }),
        output: serde_json::json!({
            "final_hand_salary": final_hand_salary.to_string(),
            "total_salary": total_salary.to_string()
        }),
        reasoning: format!(
            "{} - {} + {} + {} = {}; + bank {} = {}",
            record.hand_salary,
            record.deductions,
            record.additions,
            bonus,
            final_hand_salary,
            record.bank_salary,
            total_salary
        ),
    };

    PayrollTotals {
        final_hand_salary,
        total_salary,
        audit_step,
    }
}

/// Writes freshly calculated totals onto the record.
pub fn recompute_payroll_totals(record: &mut PayrollRecord) -> PayrollTotals {
    let totals = calculate_payroll_totals(record, 1);
    record.final_hand_salary = totals.final_hand_salary;
    record.total_salary = totals.total_salary;
    totals
}

/// Checks that the stored totals match their formulas to the cent.
pub fn verify_payroll_totals(record: &PayrollRecord) -> EngineResult<()> {
    let expected = calculate_payroll_totals(record, 1);

    if round_money(record.final_hand_salary) != expected.final_hand_salary {
        return Err(EngineError::InconsistentTotals {
            record: format!("payroll {}", record.id),
            message: format!(
                "final_hand_salary {} != {}",
                record.final_hand_salary, expected.final_hand_salary
            ),
        });
    }
    if round_money(record.total_salary) != round_money(record.final_hand_salary + record.bank_salary) {
        return Err(EngineError::InconsistentTotals {
            record: format!("payroll {}", record.id),
            message: format!(
                "total_salary {} != final_hand_salary {} + bank_salary {}",
                record.total_salary, record.final_hand_salary, record.bank_salary
            ),
        });
    }
    Ok(())
}
