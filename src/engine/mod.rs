//! The payroll and settlement engine.
//!
//! [`Engine`] owns a [`PayrollStore`] and the loaded [`EngineRules`] and
//! exposes every operation the back office performs: generating and editing
//! monthly payroll records, confirming payments, and generating and paying
//! termination settlements. The operations themselves live in the
//! [`payroll`] and [`settlement`] submodules.

pub mod payroll;
pub mod settlement;

pub use payroll::PayrollPreview;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::config::{ConfigLoader, EngineRules};
use crate::error::{EngineError, EngineResult, ErrorKind};
use crate::models::Employee;
use crate::store::{PayrollStore, StoreError};

/// The computation engine, generic over its store.
///
/// # Example
///
/// ```
/// use payroll_engine::config::EngineRules;
/// use payroll_engine::engine::Engine;
/// use payroll_engine::store::InMemoryStore;
///
/// let engine = Engine::new(InMemoryStore::new(), EngineRules::default());
/// assert_eq!(engine.rules().settlement.days_per_month, 30);
/// ```
#[derive(Debug)]
pub struct Engine<S: PayrollStore> {
    store: S,
    rules: EngineRules,
}

impl<S: PayrollStore> Engine<S> {
    /// Creates an engine over `store` with the given rules.
    pub fn new(store: S, rules: EngineRules) -> Self {
        Self { store, rules }
    }

    /// Creates an engine with the rules held by a loaded configuration.
    pub fn with_config(store: S, config: &ConfigLoader) -> Self {
        Self::new(store, config.rules().clone())
    }

    /// The engine's rules.
    pub fn rules(&self) -> &EngineRules {
        &self.rules
    }

    /// Shared access to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Exclusive access to the store, for seeding.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the engine, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    pub(crate) fn require_employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.store
            .find_employee(employee_id)
            .map_err(persist("find_employee"))?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }
}

/// Maps a store error to [`EngineError::Persistence`] tagged with the call.
pub(crate) fn persist(operation: &'static str) -> impl FnOnce(StoreError) -> EngineError {
    move |source| EngineError::persistence(operation, source)
}

/// What happened to one subject of a batch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// A new record was written.
    Generated,
    /// An existing record was overwritten.
    Updated,
    /// Nothing was written; see the reason.
    Skipped,
    /// A write was attempted and the store refused it.
    Failed,
}

/// The outcome for one employee in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// The employee the outcome is about.
    pub employee_id: String,
    /// What happened.
    pub status: OutcomeStatus,
    /// The record written, when one was.
    pub record_id: Option<Uuid>,
    /// Why the employee was skipped or failed.
    pub reason: Option<String>,
}

/// Counts and per-employee outcomes of a batch operation.
///
/// # Example
///
/// ```
/// use payroll_engine::engine::GenerationReport;
///
/// let report = GenerationReport::default();
/// assert_eq!(report.total(), 0);
/// assert!(report.outcomes.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// New records written.
    pub generated: usize,
    /// Existing records overwritten.
    pub updated: usize,
    /// Employees left untouched.
    pub skipped: usize,
    /// Employees whose write failed.
    pub failed: usize,
    /// One entry per employee, in processing order.
    pub outcomes: Vec<GenerationOutcome>,
}

impl GenerationReport {
    /// Number of employees processed.
    pub fn total(&self) -> usize {
        self.generated + self.updated + self.skipped + self.failed
    }

    /// Returns the outcome for an employee, if it was processed.
    pub fn outcome_for(&self, employee_id: &str) -> Option<&GenerationOutcome> {
        self.outcomes.iter().find(|o| o.employee_id == employee_id)
    }

    pub(crate) fn written(&mut self, employee_id: &str, status: OutcomeStatus, record_id: Uuid) {
        match status {
            OutcomeStatus::Generated => self.generated += 1,
            OutcomeStatus::Updated => self.updated += 1,
            OutcomeStatus::Skipped => self.skipped += 1,
            OutcomeStatus::Failed => self.failed += 1,
        }
        self.outcomes.push(GenerationOutcome {
            employee_id: employee_id.to_string(),
            status,
            record_id: Some(record_id),
            reason: None,
        });
    }

    pub(crate) fn skipped(&mut self, employee_id: &str, reason: impl Into<String>) {
        self.skipped += 1;
        self.outcomes.push(GenerationOutcome {
            employee_id: employee_id.to_string(),
            status: OutcomeStatus::Skipped,
            record_id: None,
            reason: Some(reason.into()),
        });
    }

    /// Classifies a per-employee error: lookup and validation problems skip
    /// the employee, persistence problems count as failures.
    pub(crate) fn errored(&mut self, employee_id: &str, operation: &str, err: &EngineError) {
        match err.kind() {
            ErrorKind::Persistence => {
                warn!(
                    employee_id = %employee_id,
                    operation = operation,
                    error = %err,
                    "Write failed, continuing batch"
                );
                self.failed += 1;
                self.outcomes.push(GenerationOutcome {
                    employee_id: employee_id.to_string(),
                    status: OutcomeStatus::Failed,
                    record_id: None,
                    reason: Some(err.to_string()),
                });
            }
            ErrorKind::Lookup | ErrorKind::Validation | ErrorKind::Configuration => {
                warn!(
                    employee_id = %employee_id,
                    operation = operation,
                    error = %err,
                    "Skipping employee"
                );
                self.skipped(employee_id, err.to_string());
            }
        }
    }
}
