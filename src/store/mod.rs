//! Persistence contract for the payroll engine.
//!
//! The engine never talks to a database directly. Every read and write goes
//! through a [`PayrollStore`] it owns, so the same engine runs against a
//! hosted database adapter in production and [`InMemoryStore`] in tests.

mod memory;

pub use memory::InMemoryStore;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    AttendanceEvent, Employee, EmployeeStatus, LiquidationRecord, PayPeriod, PayrollDetail,
    PayrollRecord,
};

/// Errors reported by a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated.
    #[error("{operation}: conflict on {key}")]
    Conflict {
        /// The store call that failed.
        operation: String,
        /// The key that already exists.
        key: String,
    },

    /// The row to update does not exist.
    #[error("{operation}: {key} not found")]
    NotFound {
        /// The store call that failed.
        operation: String,
        /// The missing key.
        key: String,
    },

    /// The store refused the row.
    #[error("{operation}: rejected: {message}")]
    Rejected {
        /// The store call that failed.
        operation: String,
        /// Why the row was refused.
        message: String,
    },

    /// The store could not be reached.
    #[error("{operation}: store unavailable")]
    Unavailable {
        /// The store call that failed.
        operation: String,
    },
}

impl StoreError {
    /// Returns the store call that failed.
    pub fn operation(&self) -> &str {
        match self {
            StoreError::Conflict { operation, .. }
            | StoreError::NotFound { operation, .. }
            | StoreError::Rejected { operation, .. }
            | StoreError::Unavailable { operation } => operation,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The tables the engine reads and writes.
///
/// Reads return `Ok(None)` or an empty list when nothing matches; an `Err`
/// always means the store itself failed. Writes replace whole rows.
pub trait PayrollStore {
    /// Employees with the given status.
    fn list_employees(&self, status: EmployeeStatus) -> StoreResult<Vec<Employee>>;

    /// One employee by id.
    fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>>;

    /// An employee's attendance with `from <= date <= to`, ordered by date.
    fn list_attendance(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<AttendanceEvent>>;

    /// The payroll record for an employee and period.
    fn find_payroll(&self, employee_id: &str, period: PayPeriod)
    -> StoreResult<Option<PayrollRecord>>;

    /// One payroll record by id.
    fn get_payroll(&self, payroll_id: Uuid) -> StoreResult<Option<PayrollRecord>>;

    /// The employee's payroll record for the latest period.
    fn latest_payroll(&self, employee_id: &str) -> StoreResult<Option<PayrollRecord>>;

    /// Inserts a payroll record, failing with `Conflict` when the employee
    /// already has one for that month.
    fn insert_payroll(&mut self, record: PayrollRecord) -> StoreResult<PayrollRecord>;

    /// Replaces a stored payroll record.
    fn update_payroll(&mut self, record: &PayrollRecord) -> StoreResult<()>;

    /// Inserts a detail line for an existing payroll record.
    fn insert_payroll_detail(&mut self, detail: PayrollDetail) -> StoreResult<()>;

    /// Detail lines of a payroll record, in insertion order.
    fn list_payroll_details(&self, payroll_id: Uuid) -> StoreResult<Vec<PayrollDetail>>;

    /// Deletes every detail line of a payroll record, returning how many.
    fn delete_payroll_details(&mut self, payroll_id: Uuid) -> StoreResult<usize>;

    /// Payroll records of a period, optionally filtered on `is_paid`.
    fn list_payrolls(
        &self,
        period: PayPeriod,
        is_paid: Option<bool>,
    ) -> StoreResult<Vec<PayrollRecord>>;

    /// The employee's settlement.
    fn find_liquidation(&self, employee_id: &str) -> StoreResult<Option<LiquidationRecord>>;

    /// Inserts a settlement, failing with `Conflict` when the employee
    /// already has one.
    fn insert_liquidation(&mut self, record: LiquidationRecord)
    -> StoreResult<LiquidationRecord>;

    /// Replaces a stored settlement.
    fn update_liquidation(&mut self, record: &LiquidationRecord) -> StoreResult<()>;

    /// Settlements, optionally filtered on `is_paid`.
    fn list_liquidations(&self, is_paid: Option<bool>) -> StoreResult<Vec<LiquidationRecord>>;
}
