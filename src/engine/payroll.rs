//! Monthly payroll operations.
//!
//! Generation composes the calculators in order (salary split, period
//! aggregation, totals) and writes the record with its detail lines. Every
//! later edit goes through the same recompute-and-verify path before the
//! record is written back.

use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{
    PeriodAdjustments, aggregate_period, calculate_payroll_totals, recompute_payroll_totals,
    round_money, split_salary, verify_payroll_totals,
};
use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceEvent, AuditTrace, AuditWarning, DetailKind, Employee, EmployeeStatus, PayPeriod,
    PaymentConfirmation, PayrollDetail, PayrollPatch, PayrollRecord, PayrollSummary,
};
use crate::store::PayrollStore;

use super::{Engine, GenerationReport, OutcomeStatus, persist};

/// A payroll record computed without being persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollPreview {
    /// The record generation would write.
    pub record: PayrollRecord,
    /// The detail lines generation would write.
    pub details: Vec<PayrollDetail>,
    /// How every figure was reached.
    pub audit_trace: AuditTrace,
}

enum GenerationStep {
    Written(OutcomeStatus, Uuid),
    AlreadyGenerated,
}

impl<S: PayrollStore> Engine<S> {
    /// Generates payroll records for the given employees and period.
    ///
    /// Employees that already have a record for the period are skipped, so
    /// running the same batch twice writes each record once. Unknown or
    /// invalid employees are skipped; store failures are counted as failed.
    /// The batch never stops early.
    pub fn generate_payroll(&mut self, employee_ids: &[String], period: PayPeriod) -> GenerationReport {
        self.run_generation(employee_ids, period, false)
    }

    /// Generates payroll records for every active employee.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the employee list cannot be read.
    pub fn generate_payroll_for_active(&mut self, period: PayPeriod) -> EngineResult<GenerationReport> {
        let employee_ids: Vec<String> = self
            .store
            .list_employees(EmployeeStatus::Active)
            .map_err(persist("list_employees"))?
            .into_iter()
            .map(|e| e.id)
            .collect();
        Ok(self.generate_payroll(&employee_ids, period))
    }

    /// Regenerates payroll records, overwriting existing ones in place.
    ///
    /// The record keeps its id and payment flags; every monetary field is
    /// derived again from scratch (the attendance bonus returns to its
    /// default) and the detail lines are replaced. Fully paid records are
    /// skipped.
    pub fn force_regenerate_payroll(
        &mut self,
        employee_ids: &[String],
        period: PayPeriod,
    ) -> GenerationReport {
        self.run_generation(employee_ids, period, true)
    }

    /// Computes the record generation would write, with its audit trace.
    ///
    /// Nothing is persisted. A warning is attached when a record already
    /// exists for the period.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound` if the employee does not exist
    /// - `InvalidEmployee` if a salary is negative
    /// - `Persistence` if attendance cannot be read
    pub fn preview_payroll(&self, employee_id: &str, period: PayPeriod) -> EngineResult<PayrollPreview> {
        let employee = self.require_employee(employee_id)?;
        let existing = self
            .store
            .find_payroll(employee_id, period)
            .map_err(persist("find_payroll"))?;

        let id = existing.as_ref().map_or_else(Uuid::new_v4, |r| r.id);
        let mut preview = self.compute_payroll(&employee, period, id)?;

        if let Some(existing) = existing {
            preview.audit_trace.warnings.push(AuditWarning::new(
                "PAYROLL_EXISTS",
                format!(
                    "Payroll {} already exists for {}; generation would skip it",
                    existing.id, period
                ),
                "low",
            ));
        }
        Ok(preview)
    }

    /// Edits the editable fields of a payroll record.
    ///
    /// Fields missing from the patch keep their stored value. The derived
    /// totals are recomputed and checked before the record is written.
    ///
    /// # Errors
    ///
    /// - `PayrollNotFound` if no record has this id
    /// - `PayrollAlreadyPaid` if the record is fully paid
    /// - `InvalidAdjustment` if a patched amount is negative
    pub fn update_payroll(&mut self, payroll_id: Uuid, patch: &PayrollPatch) -> EngineResult<PayrollRecord> {
        let mut record = self.require_unpaid_payroll(payroll_id)?;

        for (field, value) in [
            ("deductions", patch.deductions),
            ("additions", patch.additions),
            ("attendance_bonus", patch.attendance_bonus),
        ] {
            if let Some(amount) = value.filter(|a| *a < Decimal::ZERO) {
                return Err(EngineError::InvalidAdjustment {
                    message: format!("{} cannot be negative: {}", field, amount),
                });
            }
        }

        if patch.is_empty() {
            debug!(payroll_id = %payroll_id, "Empty payroll patch");
            return Ok(record);
        }

        patch.apply_to(&mut record);
        self.write_back(&mut record)?;

        info!(
            payroll_id = %payroll_id,
            employee_id = %record.employee_id,
            final_hand_salary = %record.final_hand_salary,
            total_salary = %record.total_salary,
            "Payroll record updated"
        );
        Ok(record)
    }

    /// Adds a manual addition or deduction line to a payroll record.
    ///
    /// The amount (rounded to cents) is added to the record's additions or
    /// deductions and the totals are recomputed.
    ///
    /// # Errors
    ///
    /// - `InvalidAdjustment` if the amount is not positive or the concept is blank
    /// - `PayrollNotFound` if no record has this id
    /// - `PayrollAlreadyPaid` if the record is fully paid
    pub fn add_payroll_adjustment(
        &mut self,
        payroll_id: Uuid,
        kind: DetailKind,
        concept: &str,
        amount: Decimal,
    ) -> EngineResult<PayrollRecord> {
        let amount = round_money(amount);
        if amount <= Decimal::ZERO {
            return Err(EngineError::InvalidAdjustment {
                message: format!("amount must be positive, got {}", amount),
            });
        }
        let concept = concept.trim();
        if concept.is_empty() {
            return Err(EngineError::InvalidAdjustment {
                message: "concept is required".to_string(),
            });
        }

        let mut record = self.require_unpaid_payroll(payroll_id)?;
        match kind {
            DetailKind::Deduction => record.deductions += amount,
            DetailKind::Addition => record.additions += amount,
        }
        self.write_back(&mut record)?;
        self.store
            .insert_payroll_detail(PayrollDetail::new(payroll_id, kind, concept, amount))
            .map_err(persist("insert_payroll_detail"))?;

        info!(
            payroll_id = %payroll_id,
            kind = ?kind,
            amount = %amount,
            total_salary = %record.total_salary,
            "Manual adjustment added"
        );
        Ok(record)
    }

    /// Confirms payment of one or both channels of a payroll record.
    ///
    /// Each confirmed channel sets its paid flag and payment date. The
    /// record becomes fully paid only when both channels are confirmed in
    /// the same action, which also stores the method, reference and date.
    /// Channels confirmed in separate actions leave the record in
    /// [`PaymentState::BothChannelsPaid`](crate::models::PaymentState::BothChannelsPaid).
    ///
    /// # Errors
    ///
    /// - `PayrollNotFound` if no record has this id
    /// - `PayrollAlreadyPaid` if the record is fully paid
    /// - `NothingToConfirm` if neither channel is selected
    pub fn confirm_payment(
        &mut self,
        payroll_id: Uuid,
        confirmation: &PaymentConfirmation,
    ) -> EngineResult<PayrollRecord> {
        let mut record = self.require_unpaid_payroll(payroll_id)?;
        if !confirmation.hand && !confirmation.bank {
            return Err(EngineError::NothingToConfirm { payroll_id });
        }

        if confirmation.hand {
            record.is_paid_hand = true;
            record.hand_payment_date = Some(confirmation.date);
        }
        if confirmation.bank {
            record.is_paid_bank = true;
            record.bank_payment_date = Some(confirmation.date);
        }
        if confirmation.hand && confirmation.bank {
            record.is_paid = true;
            record.payment_date = Some(confirmation.date);
            record.payment_method = confirmation.method.clone();
            record.payment_reference = confirmation.reference.clone();
        }

        self.store
            .update_payroll(&record)
            .map_err(persist("update_payroll"))?;

        info!(
            payroll_id = %payroll_id,
            employee_id = %record.employee_id,
            state = ?record.payment_state(),
            "Payment confirmed"
        );
        Ok(record)
    }

    /// Payroll records of a period, optionally filtered on `is_paid`.
    pub fn list_payrolls(&self, period: PayPeriod, is_paid: Option<bool>) -> EngineResult<Vec<PayrollRecord>> {
        self.store
            .list_payrolls(period, is_paid)
            .map_err(persist("list_payrolls"))
    }

    /// Counts and sums of a period's payroll records.
    pub fn payroll_summary(&self, period: PayPeriod) -> EngineResult<PayrollSummary> {
        let records = self.list_payrolls(period, None)?;

        let mut summary = PayrollSummary {
            period,
            record_count: records.len(),
            paid_count: 0,
            pending_count: 0,
            total_hand: Decimal::ZERO,
            total_bank: Decimal::ZERO,
            total_salary: Decimal::ZERO,
            pending_amount: Decimal::ZERO,
        };
        for record in &records {
            summary.total_hand += record.final_hand_salary;
            summary.total_bank += record.bank_salary;
            summary.total_salary += record.total_salary;
            if record.is_paid {
                summary.paid_count += 1;
            } else {
                summary.pending_count += 1;
                summary.pending_amount += record.total_salary;
            }
        }
        Ok(summary)
    }

    /// Detail lines of a payroll record.
    ///
    /// # Errors
    ///
    /// Returns `PayrollNotFound` if no record has this id.
    pub fn payroll_details(&self, payroll_id: Uuid) -> EngineResult<Vec<PayrollDetail>> {
        self.require_payroll(payroll_id)?;
        self.store
            .list_payroll_details(payroll_id)
            .map_err(persist("list_payroll_details"))
    }

    fn run_generation(&mut self, employee_ids: &[String], period: PayPeriod, force: bool) -> GenerationReport {
        let operation = if force {
            "force_regenerate_payroll"
        } else {
            "generate_payroll"
        };
        let mut report = GenerationReport::default();

        for employee_id in employee_ids {
            match self.generate_one(employee_id, period, force) {
                Ok(GenerationStep::Written(status, record_id)) => {
                    report.written(employee_id, status, record_id);
                }
                Ok(GenerationStep::AlreadyGenerated) => {
                    debug!(employee_id = %employee_id, period = %period, "Payroll already generated");
                    report.skipped(employee_id, format!("payroll already generated for {}", period));
                }
                Err(err) => report.errored(employee_id, operation, &err),
            }
        }

        info!(
            operation = operation,
            month = period.month(),
            year = period.year(),
            generated = report.generated,
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failed,
            "Payroll generation completed"
        );
        report
    }

    fn generate_one(&mut self, employee_id: &str, period: PayPeriod, force: bool) -> EngineResult<GenerationStep> {
        let employee = self.require_employee(employee_id)?;
        let existing = self
            .store
            .find_payroll(employee_id, period)
            .map_err(persist("find_payroll"))?;

        let id = match &existing {
            Some(_) if !force => return Ok(GenerationStep::AlreadyGenerated),
            Some(record) if record.is_paid => {
                return Err(EngineError::PayrollAlreadyPaid {
                    payroll_id: record.id,
                });
            }
            Some(record) => record.id,
            None => Uuid::new_v4(),
        };

        let PayrollPreview {
            mut record,
            details,
            ..
        } = self.compute_payroll(&employee, period, id)?;

        let status = match existing {
            Some(previous) => {
                record.is_paid_hand = previous.is_paid_hand;
                record.hand_payment_date = previous.hand_payment_date;
                record.is_paid_bank = previous.is_paid_bank;
                record.bank_payment_date = previous.bank_payment_date;
                verify_payroll_totals(&record)?;

                self.store
                    .update_payroll(&record)
                    .map_err(persist("update_payroll"))?;
                self.store
                    .delete_payroll_details(id)
                    .map_err(persist("delete_payroll_details"))?;
                OutcomeStatus::Updated
            }
            None => {
                verify_payroll_totals(&record)?;
                self.store
                    .insert_payroll(record.clone())
                    .map_err(persist("insert_payroll"))?;
                OutcomeStatus::Generated
            }
        };

        for detail in details {
            self.store
                .insert_payroll_detail(detail)
                .map_err(persist("insert_payroll_detail"))?;
        }

        info!(
            employee_id = %employee_id,
            payroll_id = %id,
            month = period.month(),
            year = period.year(),
            deductions = %record.deductions,
            additions = %record.additions,
            total_salary = %record.total_salary,
            "Payroll record written"
        );
        Ok(GenerationStep::Written(status, id))
    }

    /// Runs the payroll pipeline for one employee without writing anything.
    fn compute_payroll(&self, employee: &Employee, period: PayPeriod, id: Uuid) -> EngineResult<PayrollPreview> {
        let start_time = Instant::now();
        validate_salaries(employee)?;

        let events = self
            .store
            .list_attendance(&employee.id, period.first_day(), period.last_day())
            .map_err(persist("list_attendance"))?;

        let mut trace = AuditTrace::default();
        trace.warnings.extend(attendance_warnings(employee, &events));

        let split = split_salary(employee.base_salary, employee.bank_salary, trace.next_step_number());
        let (hand_salary, bank_salary, total_before_adjustments) =
            (split.hand_salary, split.bank_salary, split.total_before_adjustments);
        trace.steps.push(split.audit_step);

        let adjustments = aggregate_period(
            &events,
            period,
            total_before_adjustments,
            &self.rules,
            trace.next_step_number(),
        );
        debug!(
            employee_id = %employee.id,
            events_counted = adjustments.events_counted,
            deductions = %adjustments.deductions,
            additions = %adjustments.additions,
            "Attendance aggregated"
        );

        let mut record = PayrollRecord {
            id,
            employee_id: employee.id.clone(),
            month: period.month(),
            year: period.year(),
            base_salary: employee.base_salary,
            bank_salary,
            hand_salary,
            deductions: adjustments.deductions,
            additions: adjustments.additions,
            has_attendance_bonus: false,
            attendance_bonus: self.rules.payroll.attendance_bonus,
            final_hand_salary: Decimal::ZERO,
            total_salary: Decimal::ZERO,
            is_paid_hand: false,
            hand_payment_date: None,
            is_paid_bank: false,
            bank_payment_date: None,
            is_paid: false,
            payment_method: None,
            payment_reference: None,
            payment_date: None,
        };
        let details = detail_lines(id, &adjustments, &self.rules.payroll);
        trace.steps.push(adjustments.audit_step);

        let totals = calculate_payroll_totals(&record, trace.next_step_number());
        record.final_hand_salary = totals.final_hand_salary;
        record.total_salary = totals.total_salary;
        trace.steps.push(totals.audit_step);

        trace.duration_us = start_time.elapsed().as_micros() as u64;

        Ok(PayrollPreview {
            record,
            details,
            audit_trace: trace,
        })
    }

    fn require_payroll(&self, payroll_id: Uuid) -> EngineResult<PayrollRecord> {
        self.store
            .get_payroll(payroll_id)
            .map_err(persist("get_payroll"))?
            .ok_or(EngineError::PayrollNotFound { payroll_id })
    }

    fn require_unpaid_payroll(&self, payroll_id: Uuid) -> EngineResult<PayrollRecord> {
        let record = self.require_payroll(payroll_id)?;
        if record.is_paid {
            return Err(EngineError::PayrollAlreadyPaid { payroll_id });
        }
        Ok(record)
    }

    /// Recomputes the totals, checks them, and writes the record.
    fn write_back(&mut self, record: &mut PayrollRecord) -> EngineResult<()> {
        recompute_payroll_totals(record);
        verify_payroll_totals(record)?;
        self.store
            .update_payroll(record)
            .map_err(persist("update_payroll"))
    }
}

fn validate_salaries(employee: &Employee) -> EngineResult<()> {
    for (field, amount) in [
        ("base_salary", employee.base_salary),
        ("bank_salary", employee.bank_salary),
    ] {
        if amount < Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                employee_id: employee.id.clone(),
                field: field.to_string(),
                message: format!("cannot be negative: {}", amount),
            });
        }
    }
    Ok(())
}

fn detail_lines(payroll_id: Uuid, adjustments: &PeriodAdjustments, rules: &PayrollRules) -> Vec<PayrollDetail> {
    let mut details = Vec::with_capacity(2);
    if !adjustments.deductions.is_zero() {
        details.push(PayrollDetail::new(
            payroll_id,
            DetailKind::Deduction,
            rules.deduction_concept.as_str(),
            adjustments.deductions,
        ));
    }
    if !adjustments.additions.is_zero() {
        details.push(PayrollDetail::new(
            payroll_id,
            DetailKind::Addition,
            rules.addition_concept.as_str(),
            adjustments.additions,
        ));
    }
    details
}

fn attendance_warnings(employee: &Employee, events: &[AttendanceEvent]) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    if !employee.is_active() {
        warnings.push(AuditWarning::new(
            "INACTIVE_EMPLOYEE",
            format!("Employee {} is inactive", employee.id),
            "low",
        ));
    }
    if employee.bank_salary > employee.base_salary {
        warnings.push(AuditWarning::new(
            "BANK_EXCEEDS_BASE",
            format!(
                "Bank salary {} exceeds base salary {}; treated as an extra",
                employee.bank_salary, employee.base_salary
            ),
            "low",
        ));
    }

    for event in events.iter().filter(|e| !e.is_absent) {
        match (event.check_in, event.check_out) {
            (Some(_), None) => warnings.push(AuditWarning::new(
                "MISSING_CHECK_OUT",
                format!("{} on {} has no check-out; no time worked counted", event.id, event.date),
                "medium",
            )),
            (None, Some(_)) => warnings.push(AuditWarning::new(
                "MISSING_CHECK_IN",
                format!("{} on {} has no check-in; no time worked counted", event.id, event.date),
                "medium",
            )),
            (Some(check_in), Some(check_out)) if check_out < check_in => {
                warnings.push(AuditWarning::new(
                    "NEGATIVE_WORKED_TIME",
                    format!("{} on {} checks out before checking in", event.id, event.date),
                    "high",
                ))
            }
            _ => {}
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineRules;
    use crate::models::PaymentState;
    use crate::store::InMemoryStore;
    use chrono::{NaiveDate, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn march() -> PayPeriod {
        PayPeriod::new(3, 2025).unwrap()
    }

    fn engine() -> Engine<InMemoryStore> {
        let mut store = InMemoryStore::new();
        store.add_employee(Employee {
            id: "emp_001".to_string(),
            name: "Ana".to_string(),
            base_salary: dec("300000"),
            bank_salary: dec("100000"),
            hire_date: date(2024, 1, 15),
            termination_date: None,
            status: EmployeeStatus::Active,
        });
        store.add_attendance(AttendanceEvent::worked(
            "att_001",
            "emp_001",
            date(2025, 3, 3),
            (t(9, 10), t(17, 0)),
            (t(9, 0), t(17, 0)),
        ));
        Engine::new(store, EngineRules::default())
    }

    fn generate(engine: &mut Engine<InMemoryStore>) -> Uuid {
        let report = engine.generate_payroll(&["emp_001".to_string()], march());
        report.outcomes[0].record_id.unwrap()
    }

    // ==========================================================================
    // PR-001: ten late minutes
    // ==========================================================================
    #[test]
    fn test_pr_001_generation_applies_late_deduction() {
        let mut engine = engine();
        let id = generate(&mut engine);

        let record = engine.store().get_payroll(id).unwrap().unwrap();
        assert_eq!(record.hand_salary, dec("200000"));
        assert_eq!(record.deductions, dec("208.33"));
        assert_eq!(record.final_hand_salary, dec("199791.67"));
        assert_eq!(record.total_salary, dec("299791.67"));
        assert!(!record.has_attendance_bonus);

        let details = engine.payroll_details(id).unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].kind, DetailKind::Deduction);
        assert_eq!(details[0].concept, "Ausencias y tardanzas");
    }

    /// PR-002: second run skips
    #[test]
    fn test_pr_002_generation_is_idempotent() {
        let mut engine = engine();
        generate(&mut engine);

        let report = engine.generate_payroll(&["emp_001".to_string()], march());
        assert_eq!(report.skipped, 1);
        assert_eq!(report.generated, 0);
        assert_eq!(engine.store().payroll_count(), 1);
    }

    /// PR-003: preview matches generation and writes nothing
    #[test]
    fn test_pr_003_preview_does_not_persist() {
        let engine = engine();
        let preview = engine.preview_payroll("emp_001", march()).unwrap();

        assert_eq!(preview.record.total_salary, dec("299791.67"));
        assert_eq!(engine.store().payroll_count(), 0);

        let rule_ids: Vec<&str> = preview
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(rule_ids, vec!["salary_split", "period_aggregation", "payroll_totals"]);
        assert_eq!(preview.audit_trace.steps[2].step_number, 3);
    }

    #[test]
    fn test_update_payroll_recomputes_totals() {
        let mut engine = engine();
        let id = generate(&mut engine);

        let patch = PayrollPatch {
            has_attendance_bonus: Some(true),
            attendance_bonus: Some(dec("15000")),
            ..Default::default()
        };
        let record = engine.update_payroll(id, &patch).unwrap();

        assert_eq!(record.final_hand_salary, dec("214791.67"));
        assert_eq!(record.total_salary, dec("314791.67"));
        assert_eq!(engine.store().get_payroll(id).unwrap().unwrap(), record);
    }

    #[test]
    fn test_update_payroll_rejects_negative_amount() {
        let mut engine = engine();
        let id = generate(&mut engine);

        let patch = PayrollPatch {
            deductions: Some(dec("-1")),
            ..Default::default()
        };
        assert!(matches!(
            engine.update_payroll(id, &patch),
            Err(EngineError::InvalidAdjustment { .. })
        ));
    }

    #[test]
    fn test_manual_adjustment_adds_detail_and_recomputes() {
        let mut engine = engine();
        let id = generate(&mut engine);

        let record = engine
            .add_payroll_adjustment(id, DetailKind::Addition, "Premio", dec("5000"))
            .unwrap();
        assert_eq!(record.additions, dec("5000"));
        assert_eq!(record.final_hand_salary, dec("204791.67"));
        assert_eq!(engine.payroll_details(id).unwrap().len(), 2);
    }

    #[test]
    fn test_manual_adjustment_requires_positive_amount() {
        let mut engine = engine();
        let id = generate(&mut engine);

        let result = engine.add_payroll_adjustment(id, DetailKind::Deduction, "Adelanto", Decimal::ZERO);
        assert!(matches!(result, Err(EngineError::InvalidAdjustment { .. })));
        assert_eq!(engine.payroll_details(id).unwrap().len(), 1);
    }

    #[test]
    fn test_confirm_both_channels_marks_paid() {
        let mut engine = engine();
        let id = generate(&mut engine);

        let record = engine
            .confirm_payment(
                id,
                &PaymentConfirmation {
                    hand: true,
                    bank: true,
                    date: date(2025, 4, 5),
                    method: Some("transfer".to_string()),
                    reference: Some("TX-99".to_string()),
                },
            )
            .unwrap();

        assert_eq!(record.payment_state(), PaymentState::FullyPaid);
        assert_eq!(record.payment_date, Some(date(2025, 4, 5)));
        assert_eq!(record.payment_reference.as_deref(), Some("TX-99"));
    }

    #[test]
    fn test_confirm_nothing_is_rejected() {
        let mut engine = engine();
        let id = generate(&mut engine);

        let result = engine.confirm_payment(
            id,
            &PaymentConfirmation {
                hand: false,
                bank: false,
                date: date(2025, 4, 5),
                method: None,
                reference: None,
            },
        );
        assert!(matches!(result, Err(EngineError::NothingToConfirm { .. })));
    }

    #[test]
    fn test_unknown_payroll_id() {
        let mut engine = engine();
        let result = engine.update_payroll(Uuid::new_v4(), &PayrollPatch::default());
        assert!(matches!(result, Err(EngineError::PayrollNotFound { .. })));
    }

    #[test]
    fn test_warnings_flag_missing_check_out() {
        let mut engine = engine();
        let mut event = AttendanceEvent::worked(
            "att_002",
            "emp_001",
            date(2025, 3, 4),
            (t(9, 0), t(17, 0)),
            (t(9, 0), t(17, 0)),
        );
        event.check_out = None;
        engine.store_mut().add_attendance(event);

        let preview = engine.preview_payroll("emp_001", march()).unwrap();
        assert!(
            preview
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == "MISSING_CHECK_OUT")
        );
    }

    #[test]
    fn test_negative_salary_is_invalid() {
        let mut engine = engine();
        engine.store_mut().add_employee(Employee {
            id: "emp_bad".to_string(),
            name: String::new(),
            base_salary: dec("-1"),
            bank_salary: Decimal::ZERO,
            hire_date: date(2024, 1, 1),
            termination_date: None,
            status: EmployeeStatus::Active,
        });

        let report = engine.generate_payroll(&["emp_bad".to_string()], march());
        assert_eq!(report.skipped, 1);
        assert_eq!(engine.store().payroll_count(), 0);
    }
}
