//! Termination settlement operations.
//!
//! Settlements are upserted in batch for every inactive employee. A paid
//! settlement is never touched again; an unpaid one is recomputed from
//! current data while keeping the inclusion choices made by the office.

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{SettlementBreakdown, calculate_settlement, recompute_settlement_total};
use crate::config::LastMonthDays;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, EmployeeStatus, LiquidationRecord, SettlementPayment, SettlementToggle,
};
use crate::store::PayrollStore;

use super::{Engine, GenerationReport, OutcomeStatus, persist};

impl<S: PayrollStore> Engine<S> {
    /// Creates or refreshes the settlement of every inactive employee.
    ///
    /// - New settlements include vacation and bonus when tenure reaches the
    ///   accrual threshold.
    /// - Unpaid settlements are recomputed with their inclusion flags kept.
    /// - Paid settlements, employees without a valid termination date and
    ///   employees without a usable salary are skipped.
    /// - Store write failures are counted as failed; the batch continues.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` only if the employee list cannot be read.
    pub fn generate_settlements(&mut self) -> EngineResult<GenerationReport> {
        let employees = self
            .store
            .list_employees(EmployeeStatus::Inactive)
            .map_err(persist("list_employees"))?;
        let strategy = self.rules.settlement.last_month_days;
        let mut report = GenerationReport::default();

        for employee in &employees {
            match self.settle_one(employee, strategy) {
                Ok((status, record_id)) => report.written(&employee.id, status, record_id),
                Err(err) => report.errored(&employee.id, "generate_settlements", &err),
            }
        }

        info!(
            employees = employees.len(),
            generated = report.generated,
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failed,
            "Settlement generation completed"
        );
        Ok(report)
    }

    /// Computes an employee's settlement without persisting it.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound` if the employee does not exist
    /// - `InvalidEmployee` if the termination date is missing or before hire
    /// - `SalaryNotFound` if no usable base salary exists
    pub fn preview_settlement(&self, employee_id: &str) -> EngineResult<SettlementBreakdown> {
        let employee = self.require_employee(employee_id)?;
        let base_salary = self.settlement_salary(&employee)?;
        calculate_settlement(
            &employee,
            base_salary,
            &self.rules.settlement,
            self.rules.settlement.last_month_days,
            1,
        )
    }

    /// Changes which accruals an unpaid settlement includes.
    ///
    /// # Errors
    ///
    /// - `SettlementNotFound` if the employee has no settlement
    /// - `SettlementAlreadyPaid` if it is paid
    pub fn set_settlement_inclusion(
        &mut self,
        employee_id: &str,
        toggle: SettlementToggle,
    ) -> EngineResult<LiquidationRecord> {
        let mut record = self.require_unpaid_settlement(employee_id)?;

        if let Some(include) = toggle.include_vacation {
            record.include_vacation = include;
        }
        if let Some(include) = toggle.include_bonus {
            record.include_bonus = include;
        }
        recompute_settlement_total(&mut record);

        self.store
            .update_liquidation(&record)
            .map_err(persist("update_liquidation"))?;

        info!(
            employee_id = %employee_id,
            include_vacation = record.include_vacation,
            include_bonus = record.include_bonus,
            total_amount = %record.total_amount,
            "Settlement inclusion changed"
        );
        Ok(record)
    }

    /// Recomputes an unpaid settlement under an explicit last-month rule.
    ///
    /// Inclusion flags are kept.
    ///
    /// # Errors
    ///
    /// - `SettlementNotFound` if the employee has no settlement
    /// - `SettlementAlreadyPaid` if it is paid
    /// - `EmployeeNotFound`, `InvalidEmployee` or `SalaryNotFound` as for
    ///   [`Engine::preview_settlement`]
    pub fn recalculate_settlement(
        &mut self,
        employee_id: &str,
        strategy: LastMonthDays,
    ) -> EngineResult<LiquidationRecord> {
        let mut record = self.require_unpaid_settlement(employee_id)?;
        let employee = self.require_employee(employee_id)?;
        let base_salary = self.settlement_salary(&employee)?;

        let breakdown = calculate_settlement(
            &employee,
            base_salary,
            &self.rules.settlement,
            strategy,
            1,
        )?;
        breakdown.apply_to(&mut record);

        self.store
            .update_liquidation(&record)
            .map_err(persist("update_liquidation"))?;

        info!(
            employee_id = %employee_id,
            strategy = ?strategy,
            days_to_pay_in_last_month = record.days_to_pay_in_last_month,
            total_amount = %record.total_amount,
            "Settlement recalculated"
        );
        Ok(record)
    }

    /// Marks a settlement paid. Paid settlements never change again.
    ///
    /// # Errors
    ///
    /// - `SettlementNotFound` if the employee has no settlement
    /// - `SettlementAlreadyPaid` if it is already paid
    pub fn confirm_settlement_payment(
        &mut self,
        employee_id: &str,
        payment: &SettlementPayment,
    ) -> EngineResult<LiquidationRecord> {
        let mut record = self.require_unpaid_settlement(employee_id)?;

        record.is_paid = true;
        record.payment_date = Some(payment.date);
        record.payment_method = payment.method.clone();
        record.payment_reference = payment.reference.clone();
        record.payment_notes = payment.notes.clone();

        self.store
            .update_liquidation(&record)
            .map_err(persist("update_liquidation"))?;

        info!(
            employee_id = %employee_id,
            total_amount = %record.total_amount,
            payment_date = %payment.date,
            "Settlement paid"
        );
        Ok(record)
    }

    /// Settlements, optionally filtered on `is_paid`.
    pub fn list_settlements(&self, is_paid: Option<bool>) -> EngineResult<Vec<LiquidationRecord>> {
        self.store
            .list_liquidations(is_paid)
            .map_err(persist("list_liquidations"))
    }

    fn settle_one(
        &mut self,
        employee: &Employee,
        strategy: LastMonthDays,
    ) -> EngineResult<(OutcomeStatus, Uuid)> {
        let existing = self
            .store
            .find_liquidation(&employee.id)
            .map_err(persist("find_liquidation"))?;
        if existing.as_ref().is_some_and(|r| r.is_paid) {
            return Err(EngineError::SettlementAlreadyPaid {
                employee_id: employee.id.clone(),
            });
        }

        let base_salary = self.settlement_salary(employee)?;
        let breakdown = calculate_settlement(
            employee,
            base_salary,
            &self.rules.settlement,
            strategy,
            1,
        )?;

        match existing {
            Some(mut record) => {
                breakdown.apply_to(&mut record);
                self.store
                    .update_liquidation(&record)
                    .map_err(persist("update_liquidation"))?;
                info!(
                    employee_id = %employee.id,
                    total_amount = %record.total_amount,
                    "Settlement refreshed"
                );
                Ok((OutcomeStatus::Updated, record.id))
            }
            None => {
                let record = new_settlement(&employee.id, &breakdown);
                let record = self
                    .store
                    .insert_liquidation(record)
                    .map_err(persist("insert_liquidation"))?;
                info!(
                    employee_id = %employee.id,
                    worked_days = record.worked_days,
                    total_amount = %record.total_amount,
                    "Settlement created"
                );
                Ok((OutcomeStatus::Generated, record.id))
            }
        }
    }

    /// Base salary for a settlement: the latest payroll's, else the
    /// employee's own when positive.
    fn settlement_salary(&self, employee: &Employee) -> EngineResult<Decimal> {
        let not_found = || EngineError::SalaryNotFound {
            employee_id: employee.id.clone(),
        };

        match self.store.latest_payroll(&employee.id) {
            Ok(Some(payroll)) => Ok(payroll.base_salary),
            Ok(None) if employee.base_salary > Decimal::ZERO => Ok(employee.base_salary),
            Ok(None) => Err(not_found()),
            Err(err) => {
                warn!(
                    employee_id = %employee.id,
                    error = %err,
                    "Salary lookup failed"
                );
                Err(not_found())
            }
        }
    }

    fn require_unpaid_settlement(&self, employee_id: &str) -> EngineResult<LiquidationRecord> {
        let record = self
            .store
            .find_liquidation(employee_id)
            .map_err(persist("find_liquidation"))?
            .ok_or_else(|| EngineError::SettlementNotFound {
                employee_id: employee_id.to_string(),
            })?;
        if record.is_paid {
            return Err(EngineError::SettlementAlreadyPaid {
                employee_id: employee_id.to_string(),
            });
        }
        Ok(record)
    }
}

fn new_settlement(employee_id: &str, breakdown: &SettlementBreakdown) -> LiquidationRecord {
    let include = breakdown.include_by_default;
    LiquidationRecord {
        id: Uuid::new_v4(),
        employee_id: employee_id.to_string(),
        termination_date: breakdown.termination_date,
        worked_days: breakdown.worked_days,
        worked_months: breakdown.worked_months,
        days_to_pay_in_last_month: breakdown.days_to_pay_in_last_month,
        base_salary: breakdown.base_salary,
        last_month_payment: breakdown.last_month_payment,
        proportional_vacation: breakdown.proportional_vacation,
        proportional_bonus: breakdown.proportional_bonus,
        severance_pay: breakdown.severance_pay,
        total_amount: breakdown.total(include, include),
        include_vacation: include,
        include_bonus: include,
        is_paid: false,
        payment_date: None,
        payment_method: None,
        payment_reference: None,
        payment_notes: None,
    }
}
