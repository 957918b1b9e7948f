//! Termination settlement (liquidation) models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The final settlement owed to a departing employee.
///
/// At most one per employee. Severance is persisted under the historical
/// field name `compensation_amount`; the partial last-month pay has its own
/// field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidationRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The departing employee.
    pub employee_id: String,
    /// Last day of employment.
    pub termination_date: NaiveDate,
    /// Days between hire and termination.
    pub worked_days: i64,
    /// Whole 30-day months of tenure.
    pub worked_months: i64,
    /// Days of the final month to pay.
    pub days_to_pay_in_last_month: i64,
    /// Monthly salary the settlement is based on.
    pub base_salary: Decimal,
    /// Pay for the days of the final month.
    pub last_month_payment: Decimal,
    /// Accrued vacation for the final partial year.
    pub proportional_vacation: Decimal,
    /// Accrued year-end bonus (aguinaldo).
    pub proportional_bonus: Decimal,
    /// Severance pay (indemnización), one month per full year.
    #[serde(rename = "compensation_amount")]
    pub severance_pay: Decimal,
    /// Sum of the included components.
    pub total_amount: Decimal,
    /// Whether vacation is part of the total.
    pub include_vacation: bool,
    /// Whether the year-end bonus is part of the total.
    pub include_bonus: bool,
    /// Settlement has been paid; terminal.
    #[serde(default)]
    pub is_paid: bool,
    /// Date the settlement was paid.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// Payment method.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Payment reference.
    #[serde(default)]
    pub payment_reference: Option<String>,
    /// Free-form notes recorded with the payment.
    #[serde(default)]
    pub payment_notes: Option<String>,
}

/// A change to a settlement's inclusion checkboxes.
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementToggle {
    /// New value for `include_vacation`.
    #[serde(default)]
    pub include_vacation: Option<bool>,
    /// New value for `include_bonus`.
    #[serde(default)]
    pub include_bonus: Option<bool>,
}

/// Details recorded when a settlement is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPayment {
    /// Date of the payment.
    pub date: NaiveDate,
    /// Payment method.
    #[serde(default)]
    pub method: Option<String>,
    /// Payment reference.
    #[serde(default)]
    pub reference: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_severance_persists_as_compensation_amount() {
        let record = LiquidationRecord {
            id: Uuid::nil(),
            employee_id: "emp_001".to_string(),
            termination_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            worked_days: 400,
            worked_months: 13,
            days_to_pay_in_last_month: 10,
            base_salary: dec("300000"),
            last_month_payment: dec("100000"),
            proportional_vacation: dec("10000"),
            proportional_bonus: dec("50000"),
            severance_pay: dec("300000"),
            total_amount: dec("460000"),
            include_vacation: true,
            include_bonus: true,
            is_paid: false,
            payment_date: None,
            payment_method: None,
            payment_reference: None,
            payment_notes: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["compensation_amount"], "300000");
        assert_eq!(json["last_month_payment"], "100000");
        assert!(json.get("severance_pay").is_none());

        let parsed: LiquidationRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.severance_pay, dec("300000"));
    }

    #[test]
    fn test_toggle_deserializes_partial_object() {
        let toggle: SettlementToggle = serde_json::from_str(r#"{"include_bonus": false}"#).unwrap();
        assert_eq!(toggle.include_bonus, Some(false));
        assert_eq!(toggle.include_vacation, None);
    }
}
