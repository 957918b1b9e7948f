//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing payroll and
//! settlement records.

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Broad classification of an [`EngineError`].
///
/// Batch operations use the kind to decide whether a failing employee is
/// counted as skipped (lookup and validation) or failed (persistence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration could not be loaded.
    Configuration,
    /// A referenced employee, payroll or settlement row does not exist.
    Lookup,
    /// Input data violates a business rule.
    Validation,
    /// The store rejected a read or write.
    Persistence,
}

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// assert_eq!(error.kind(), ErrorKind::Lookup);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The employee does not exist in the store.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee that was looked up.
        employee_id: String,
    },

    /// The payroll record does not exist in the store.
    #[error("Payroll record not found: {payroll_id}")]
    PayrollNotFound {
        /// The payroll record id.
        payroll_id: Uuid,
    },

    /// No settlement exists for the employee.
    #[error("Settlement not found for employee {employee_id}")]
    SettlementNotFound {
        /// The employee whose settlement was looked up.
        employee_id: String,
    },

    /// No usable base salary could be found for a settlement.
    #[error("No base salary available for employee {employee_id}")]
    SalaryNotFound {
        /// The employee whose salary was looked up.
        employee_id: String,
    },

    /// A month/year pair that does not name a calendar month.
    #[error("Invalid pay period {month}/{year}")]
    InvalidPeriod {
        /// The requested month.
        month: u32,
        /// The requested year.
        year: i32,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee '{employee_id}' field '{field}': {message}")]
    InvalidEmployee {
        /// The employee id.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A manual payroll adjustment was rejected.
    #[error("Invalid adjustment: {message}")]
    InvalidAdjustment {
        /// Why the adjustment was rejected.
        message: String,
    },

    /// The payroll record is fully paid and can no longer change.
    #[error("Payroll record {payroll_id} is already paid")]
    PayrollAlreadyPaid {
        /// The payroll record id.
        payroll_id: Uuid,
    },

    /// The settlement is paid and can no longer change.
    #[error("Settlement for employee {employee_id} is already paid")]
    SettlementAlreadyPaid {
        /// The employee whose settlement is paid.
        employee_id: String,
    },

    /// A payment confirmation named neither channel.
    #[error("Payment confirmation for {payroll_id} selects no channel")]
    NothingToConfirm {
        /// The payroll record id.
        payroll_id: Uuid,
    },

    /// Derived totals disagree with the fields they are computed from.
    #[error("Inconsistent totals on {record}: {message}")]
    InconsistentTotals {
        /// Identifies the record being written.
        record: String,
        /// Which identity failed.
        message: String,
    },

    /// A store operation failed.
    #[error("Persistence failure during {operation}: {source}")]
    Persistence {
        /// The engine step that issued the store call.
        operation: String,
        /// The underlying store error.
        #[source]
        source: StoreError,
    },
}

impl EngineError {
    /// Wraps a store error with the engine step that issued the call.
    pub fn persistence(operation: impl Into<String>, source: StoreError) -> Self {
        EngineError::Persistence {
            operation: operation.into(),
            source,
        }
    }

    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Configuration
            }
            EngineError::EmployeeNotFound { .. }
            | EngineError::PayrollNotFound { .. }
            | EngineError::SettlementNotFound { .. }
            | EngineError::SalaryNotFound { .. } => ErrorKind::Lookup,
            EngineError::InvalidPeriod { .. }
            | EngineError::InvalidEmployee { .. }
            | EngineError::InvalidAdjustment { .. }
            | EngineError::PayrollAlreadyPaid { .. }
            | EngineError::SettlementAlreadyPaid { .. }
            | EngineError::NothingToConfirm { .. }
            | EngineError::InconsistentTotals { .. } => ErrorKind::Validation,
            EngineError::Persistence { .. } => ErrorKind::Persistence,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
