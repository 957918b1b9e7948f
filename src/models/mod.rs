//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod audit;
mod employee;
mod liquidation;
mod pay_period;
mod payroll;

pub(crate) use attendance::minutes_between;
pub use attendance::{AttendanceEvent, TimeBalance};
pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use employee::{Employee, EmployeeStatus};
pub use liquidation::{LiquidationRecord, SettlementPayment, SettlementToggle};
pub use pay_period::PayPeriod;
pub use payroll::{
    DetailKind, PaymentConfirmation, PaymentState, PayrollDetail, PayrollPatch, PayrollRecord,
    PayrollSummary,
};
