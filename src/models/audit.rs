//! Audit trace models.
//!
//! Every calculator in [`crate::calculation`] records an [`AuditStep`]
//! describing its input, output and reasoning, so a payroll or settlement
//! figure can always be explained line by line.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate data that did not prevent the calculation but is
/// likely to need a second look (a missing check-out, a negative shift).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(code: &str, message: impl Into<String>, severity: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity: severity.to_string(),
        }
    }
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.find_step("salary_split").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns the number the next pushed step should carry.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    /// Returns the first step recorded for a rule.
    pub fn find_step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}
