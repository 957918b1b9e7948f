//! Termination settlement calculation.
//!
//! This module computes tenure, partial last-month pay, proportional
//! vacation and year-end bonus (aguinaldo) accruals, and severance
//! (indemnización) for a departing employee.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::{LastMonthDays, SettlementRules};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Employee, LiquidationRecord};

use super::money::round_money;

/// Every figure of a settlement before inclusion choices are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementBreakdown {
    /// Last day of employment.
    pub termination_date: NaiveDate,
    /// Days between hire and termination.
    pub worked_days: i64,
    /// `floor(worked_days / 30)`.
    pub worked_months: i64,
    /// `floor(worked_months / 12)`.
    pub years_worked: i64,
    /// Whole calendar months worked in the termination year.
    pub months_in_current_year: i64,
    /// Days of the final month to pay, per the selected strategy.
    pub days_to_pay_in_last_month: i64,
    /// The strategy that produced `days_to_pay_in_last_month`.
    pub last_month_days: LastMonthDays,
    /// Monthly salary the settlement is based on.
    pub base_salary: Decimal,
    /// `base_salary / 30`, unrounded.
    pub daily_rate: Decimal,
    /// Pay for the days of the final month.
    pub last_month_payment: Decimal,
    /// One day's pay per month worked in the final partial year.
    pub proportional_vacation: Decimal,
    /// One twelfth of salary per month worked in the termination year.
    pub proportional_bonus: Decimal,
    /// One month's salary per full year of tenure.
    pub severance_pay: Decimal,
    /// Whether vacation and bonus are included unless overridden.
    pub include_by_default: bool,
    /// One audit step per rule applied.
    pub audit_steps: Vec<AuditStep>,
}

/// Whole calendar months from `start` to `end`, never negative.
///
/// A month counts once the same day-of-month has been reached.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::months_between;
/// use chrono::NaiveDate;
///
/// let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// assert_eq!(months_between(d(2025, 1, 15), d(2025, 4, 14)), 2);
/// assert_eq!(months_between(d(2025, 1, 15), d(2025, 4, 15)), 3);
/// ```
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months = i64::from(end.year() - start.year()) * 12 + i64::from(end.month())
        - i64::from(start.month());
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0)
}

/// Days of the final month to pay under the given strategy.
pub fn days_to_pay_in_last_month(
    strategy: LastMonthDays,
    worked_days: i64,
    termination_date: NaiveDate,
    days_per_month: i64,
) -> i64 {
    match strategy {
        LastMonthDays::WholeMonthRemainder => worked_days % days_per_month,
        LastMonthDays::CalendarDayOfMonth => i64::from(termination_date.day()),
    }
}

/// Sums the components a settlement total is made of.
///
/// `total = last_month_payment + vacation (if included) + bonus (if included) + severance`.
pub fn settlement_total(
    last_month_payment: Decimal,
    proportional_vacation: Decimal,
    proportional_bonus: Decimal,
    severance_pay: Decimal,
    include_vacation: bool,
    include_bonus: bool,
) -> Decimal {
    let vacation = if include_vacation {
        proportional_vacation
    } else {
        Decimal::ZERO
    };
    let bonus = if include_bonus {
        proportional_bonus
    } else {
        Decimal::ZERO
    };
    last_month_payment + vacation + bonus + severance_pay
}

/// Recomputes `total_amount` from the record's components and flags.
pub fn recompute_settlement_total(record: &mut LiquidationRecord) -> Decimal {
    record.total_amount = settlement_total(
        record.last_month_payment,
        record.proportional_vacation,
        record.proportional_bonus,
        record.severance_pay,
        record.include_vacation,
        record.include_bonus,
    );
    record.total_amount
}

/// Calculates the settlement of a departing employee.
///
/// # Arguments
///
/// * `employee` - Must carry a termination date on or after the hire date
/// * `base_salary` - Latest payroll base salary, or the employee's own
/// * `rules` - Settlement rules
/// * `strategy` - Which last-month day formula to use
/// * `step_number` - The step number of the first audit step
///
/// # Errors
///
/// Returns `InvalidEmployee` when the termination date is missing or
/// precedes the hire date.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_settlement;
/// use payroll_engine::config::{LastMonthDays, SettlementRules};
/// use payroll_engine::models::{Employee, EmployeeStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: String::new(),
///     base_salary: Decimal::from(300000),
///     bank_salary: Decimal::ZERO,
///     hire_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     termination_date: Some(NaiveDate::from_ymd_opt(2025, 4, 6).unwrap()),
///     status: EmployeeStatus::Inactive,
/// };
///
/// let settlement = calculate_settlement(
///     &employee,
///     Decimal::from(300000),
///     &SettlementRules::default(),
///     LastMonthDays::WholeMonthRemainder,
///     1,
/// ).unwrap();
///
/// assert_eq!(settlement.worked_days, 95);
/// assert_eq!(settlement.worked_months, 3);
/// assert_eq!(settlement.days_to_pay_in_last_month, 5);
/// assert_eq!(settlement.last_month_payment, Decimal::from(50000));
/// assert!(settlement.include_by_default);
/// ```
pub fn calculate_settlement(
    employee: &Employee,
    base_salary: Decimal,
    rules: &SettlementRules,
    strategy: LastMonthDays,
    step_number: u32,
) -> EngineResult<SettlementBreakdown> {
    let termination_date = employee
        .termination_date
        .ok_or_else(|| EngineError::InvalidEmployee {
            employee_id: employee.id.clone(),
            field: "termination_date".to_string(),
            message: "missing".to_string(),
        })?;
    if termination_date < employee.hire_date {
        return Err(EngineError::InvalidEmployee {
            employee_id: employee.id.clone(),
            field: "termination_date".to_string(),
            message: format!(
                "{} is before hire date {}",
                termination_date, employee.hire_date
            ),
        });
    }

    let days_per_month = i64::from(rules.days_per_month);
    let month_divisor = Decimal::from(rules.days_per_month);
    let mut audit_steps = Vec::with_capacity(5);
    let mut step = step_number;

    // Tenure
    let worked_days = (termination_date - employee.hire_date).num_days();
    let worked_months = worked_days / days_per_month;
    let years_worked = worked_months / 12;
    let year_start = NaiveDate::from_ymd_opt(termination_date.year(), 1, 1)
        .unwrap_or(employee.hire_date)
        .max(employee.hire_date);
    let months_in_current_year = months_between(year_start, termination_date);
    let include_by_default = worked_days >= rules.accrual_threshold_days;

    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "settlement_tenure".to_string(),
        rule_name: "Settlement Tenure".to_string(),
        input: serde_json::json!({
            "hire_date": employee.hire_date.to_string(),
            "termination_date": termination_date.to_string()
        }),
        output: serde_json::json!({
            "worked_days": worked_days,
            "worked_months": worked_months,
            "years_worked": years_worked,
            "months_in_current_year": months_in_current_year,
            "include_by_default": include_by_default
        }),
        reasoning: format!(
            "{} days = {} months of {} days ({} full years); accruals {} by default ({} day threshold)",
            worked_days,
            worked_months,
            days_per_month,
            years_worked,
            if include_by_default { "included" } else { "excluded" },
            rules.accrual_threshold_days
        ),
    });
    step += 1;

    // Last month
    let days_in_last_month =
        days_to_pay_in_last_month(strategy, worked_days, termination_date, days_per_month);
    let daily_rate = base_salary / month_divisor;
    let last_month_payment = round_money(daily_rate * Decimal::from(days_in_last_month));

    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "settlement_last_month".to_string(),
        rule_name: "Last Month Payment".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "strategy": strategy,
            "worked_days": worked_days
        }),
        output: serde_json::json!({
            "days_to_pay_in_last_month": days_in_last_month,
            "daily_rate": round_money(daily_rate).to_string(),
            "last_month_payment": last_month_payment.to_string()
        }),
        reasoning: format!(
            "{} days × {} = {}",
            days_in_last_month,
            round_money(daily_rate),
            last_month_payment
        ),
    });
    step += 1;

    // Accruals
    let vacation_months = worked_months % 12;
    let proportional_vacation = round_money(Decimal::from(vacation_months) * daily_rate);
    let bonus_months = months_in_current_year % 12;
    let proportional_bonus = round_money(base_salary / Decimal::from(12) * Decimal::from(bonus_months));

    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "settlement_accruals".to_string(),
        rule_name: "Proportional Vacation and Bonus".to_string(),
        input: serde_json::json!({
            "worked_months": worked_months,
            "months_in_current_year": months_in_current_year
        }),
        output: serde_json::json!({
            "proportional_vacation": proportional_vacation.to_string(),
            "proportional_bonus": proportional_bonus.to_string()
        }),
        reasoning: format!(
            "Vacation: {} months × one day = {}; bonus: {} months × 1/12 salary = {}",
            vacation_months, proportional_vacation, bonus_months, proportional_bonus
        ),
    });
    step += 1;

    // Severance
    let severance_pay = if years_worked > 0 {
        round_money(base_salary * Decimal::from(years_worked))
    } else {
        Decimal::ZERO
    };

    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "settlement_severance".to_string(),
        rule_name: "Severance".to_string(),
        input: serde_json::json!({
            "years_worked": years_worked,
            "base_salary": base_salary.to_string()
        }),
        output: serde_json::json!({
            "severance_pay": severance_pay.to_string()
        }),
        reasoning: if years_worked > 0 {
            format!("{} full years × {} = {}", years_worked, base_salary, severance_pay)
        } else {
            "Less than one full year, no severance".to_string()
        },
    });

    Ok(SettlementBreakdown {
        termination_date,
        worked_days,
        worked_months,
        years_worked,
        months_in_current_year,
        days_to_pay_in_last_month: days_in_last_month,
        last_month_days: strategy,
        base_salary,
        daily_rate,
        last_month_payment,
        proportional_vacation,
        proportional_bonus,
        severance_pay,
        include_by_default,
        audit_steps,
    })
}

impl SettlementBreakdown {
    /// Total under the given inclusion choices.
    pub fn total(&self, include_vacation: bool, include_bonus: bool) -> Decimal {
        settlement_total(
            self.last_month_payment,
            self.proportional_vacation,
            self.proportional_bonus,
            self.severance_pay,
            include_vacation,
            include_bonus,
        )
    }

    /// Copies every computed figure onto an existing record, keeping its
    /// inclusion flags and payment fields, and recomputes the total.
    pub fn apply_to(&self, record: &mut LiquidationRecord) {
        record.termination_date = self.termination_date;
        record.worked_days = self.worked_days;
        record.worked_months = self.worked_months;
        record.days_to_pay_in_last_month = self.days_to_pay_in_last_month;
        record.base_salary = self.base_salary;
        record.last_month_payment = self.last_month_payment;
        record.proportional_vacation = self.proportional_vacation;
        record.proportional_bonus = self.proportional_bonus;
        record.severance_pay = self.severance_pay;
        recompute_settlement_total(record);
    }
}
