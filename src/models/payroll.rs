//! Payroll record models.
//!
//! This module contains [`PayrollRecord`], its [`PayrollDetail`] line items,
//! and the typed inputs used to edit and pay a record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;

/// Whether a detail line adds to or deducts from the hand salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailKind {
    /// Increases the hand salary.
    Addition,
    /// Decreases the hand salary.
    Deduction,
}

/// A line item explaining part of a record's deductions or additions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollDetail {
    /// Unique identifier for the line.
    pub id: Uuid,
    /// The owning payroll record.
    pub payroll_id: Uuid,
    /// Addition or deduction.
    #[serde(rename = "type")]
    pub kind: DetailKind,
    /// What the line is for (e.g. "Horas extra").
    pub concept: String,
    /// Positive amount of the line.
    pub amount: Decimal,
}

impl PayrollDetail {
    /// Creates a line with a fresh id.
    pub fn new(payroll_id: Uuid, kind: DetailKind, concept: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            payroll_id,
            kind,
            concept: concept.into(),
            amount,
        }
    }
}

/// Where a payroll record is in its payment lifecycle.
///
/// Derived from the record's paid flags by [`PayrollRecord::payment_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    /// Neither channel confirmed.
    Unpaid,
    /// Only the hand portion confirmed.
    HandPaid,
    /// Only the bank portion confirmed.
    BankPaid,
    /// Both channels confirmed, but in separate actions, so the record
    /// was never marked paid.
    BothChannelsPaid,
    /// Both channels confirmed together; terminal.
    FullyPaid,
}

/// One employee's payroll for one calendar month.
///
/// `final_hand_salary` and `total_salary` are derived; see
/// [`crate::calculation::calculate_payroll_totals`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee this record pays.
    pub employee_id: String,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Full agreed salary at generation time.
    pub base_salary: Decimal,
    /// Registered portion, paid by bank.
    pub bank_salary: Decimal,
    /// Unregistered portion before adjustments.
    pub hand_salary: Decimal,
    /// Attendance deductions (absences, lateness, early departures).
    pub deductions: Decimal,
    /// Attendance additions (extra minutes).
    pub additions: Decimal,
    /// Whether the attendance bonus is granted.
    pub has_attendance_bonus: bool,
    /// Attendance bonus amount, counted only when granted.
    pub attendance_bonus: Decimal,
    /// Hand salary after adjustments and bonus.
    pub final_hand_salary: Decimal,
    /// Final hand salary plus bank salary.
    pub total_salary: Decimal,
    /// Hand portion has been paid.
    #[serde(default)]
    pub is_paid_hand: bool,
    /// Date the hand portion was paid.
    #[serde(default)]
    pub hand_payment_date: Option<NaiveDate>,
    /// Bank portion has been paid.
    #[serde(default)]
    pub is_paid_bank: bool,
    /// Date the bank portion was paid.
    #[serde(default)]
    pub bank_payment_date: Option<NaiveDate>,
    /// Both portions paid together; terminal.
    #[serde(default)]
    pub is_paid: bool,
    /// Payment method recorded with the final confirmation.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Payment reference recorded with the final confirmation.
    #[serde(default)]
    pub payment_reference: Option<String>,
    /// Date of the final confirmation.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
}

impl PayrollRecord {
    /// Returns true if the record belongs to `period`.
    pub fn is_in_period(&self, period: PayPeriod) -> bool {
        self.month == period.month() && self.year == period.year()
    }

    /// Derives the payment state from the paid flags.
    pub fn payment_state(&self) -> PaymentState {
        match (self.is_paid, self.is_paid_hand, self.is_paid_bank) {
            (true, _, _) => PaymentState::FullyPaid,
            (false, true, true) => PaymentState::BothChannelsPaid,
            (false, true, false) => PaymentState::HandPaid,
            (false, false, true) => PaymentState::BankPaid,
            (false, false, false) => PaymentState::Unpaid,
        }
    }
}

/// A partial edit of a payroll record.
///
/// Fields left as `None` keep their stored value.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollPatch;
///
/// let patch = PayrollPatch {
///     has_attendance_bonus: Some(true),
///     ..Default::default()
/// };
/// assert!(!patch.is_empty());
/// assert!(PayrollPatch::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayrollPatch {
    /// New deductions total.
    #[serde(default)]
    pub deductions: Option<Decimal>,
    /// New additions total.
    #[serde(default)]
    pub additions: Option<Decimal>,
    /// Grant or revoke the attendance bonus.
    #[serde(default)]
    pub has_attendance_bonus: Option<bool>,
    /// New attendance bonus amount.
    #[serde(default)]
    pub attendance_bonus: Option<Decimal>,
}

impl PayrollPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.deductions.is_none()
            && self.additions.is_none()
            && self.has_attendance_bonus.is_none()
            && self.attendance_bonus.is_none()
    }

    /// Copies the supplied fields onto `record`. Derived fields are untouched.
    pub fn apply_to(&self, record: &mut PayrollRecord) {
        if let Some(deductions) = self.deductions {
            record.deductions = deductions;
        }
        if let Some(additions) = self.additions {
            record.additions = additions;
        }
        if let Some(flag) = self.has_attendance_bonus {
            record.has_attendance_bonus = flag;
        }
        if let Some(bonus) = self.attendance_bonus {
            record.attendance_bonus = bonus;
        }
    }
}

/// One payment confirmation action.
///
/// Checking both channels in the same action is what marks a record paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    /// Confirm the hand portion.
    pub hand: bool,
    /// Confirm the bank portion.
    pub bank: bool,
    /// Date of the payment.
    pub date: NaiveDate,
    /// Payment method (cash, transfer).
    #[serde(default)]
    pub method: Option<String>,
    /// Payment reference.
    #[serde(default)]
    pub reference: Option<String>,
}

/// Aggregated figures for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The summarised period.
    pub period: PayPeriod,
    /// Number of records in the period.
    pub record_count: usize,
    /// Records marked fully paid.
    pub paid_count: usize,
    /// Records not yet fully paid.
    pub pending_count: usize,
    /// Sum of final hand salaries.
    pub total_hand: Decimal,
    /// Sum of bank salaries.
    pub total_bank: Decimal,
    /// Sum of total salaries.
    pub total_salary: Decimal,
    /// Sum of total salaries on records not yet fully paid.
    pub pending_amount: Decimal,
}
