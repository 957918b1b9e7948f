//! Period aggregation of attendance into money.
//!
//! This module sums the time accounting of every attendance event of one
//! employee in one month into deduction and addition amounts.

use rust_decimal::Decimal;

use crate::config::{EngineRules, PayrollRules};
use crate::models::{AttendanceEvent, AuditStep, PayPeriod};

use super::money::round_money;
use super::time_accounting::calculate_time_balance;

/// The deductions and additions for one employee and one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodAdjustments {
    /// Total deductions, rounded to cents.
    pub deductions: Decimal,
    /// Total additions, rounded to cents.
    pub additions: Decimal,
    /// Value of one salaried minute, unrounded.
    pub minute_value: Decimal,
    /// Events inside the period that were counted.
    pub events_counted: usize,
    /// Events outside the period that were ignored.
    pub events_ignored: usize,
    /// Number of unjustified absences.
    pub unjustified_absences: u32,
    /// Sum of late minutes.
    pub late_minutes: i64,
    /// Sum of early-departure minutes.
    pub early_departure_minutes: i64,
    /// Sum of extra minutes.
    pub extra_minutes: i64,
    /// The audit step recording the aggregation.
    pub audit_step: AuditStep,
}

/// Returns the value of one salaried minute.
///
/// The denominator is a fixed 30-day month of 8-hour days, whatever the
/// length of the calendar month.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::minute_value;
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = minute_value(Decimal::from(300000), &PayrollRules::default());
/// assert_eq!(value.round_dp(4), Decimal::from_str("20.8333").unwrap());
/// ```
pub fn minute_value(total_salary_before_adjustments: Decimal, rules: &PayrollRules) -> Decimal {
    total_salary_before_adjustments / rules.minutes_per_month()
}

/// Aggregates a month of attendance into deductions and additions.
///
/// For each event inside `period` (derived minute fields are recomputed
/// first, so stale stored values are never trusted):
///
/// - unjustified absence: deduct one day's salary (`total / 30`)
/// - late minutes: deduct `late × minute_value`
/// - early departure: deduct `early × minute_value`
/// - extra minutes: add `extra × minute_value × 1.5`
///
/// Both totals are rounded to cents once, at the end.
///
/// # Arguments
///
/// * `events` - The employee's attendance; events outside the period are ignored
/// * `period` - The calendar month being paid
/// * `total_salary_before_adjustments` - From [`crate::calculation::split_salary`]
/// * `rules` - Engine rules
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_period;
/// use payroll_engine::config::EngineRules;
/// use payroll_engine::models::{AttendanceEvent, PayPeriod};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let late = AttendanceEvent::worked(
///     "att_001",
///     "emp_001",
///     NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     (t(9, 10), t(17, 0)),
///     (t(9, 0), t(17, 0)),
/// );
///
/// let result = aggregate_period(
///     &[late],
///     PayPeriod::new(3, 2025).unwrap(),
///     Decimal::from(300000),
///     &EngineRules::default(),
///     1,
/// );
/// assert_eq!(result.deductions, Decimal::from_str("208.33").unwrap());
/// assert_eq!(result.additions, Decimal::ZERO);
/// ```
pub fn aggregate_period(
    events: &[AttendanceEvent],
    period: PayPeriod,
    total_salary_before_adjustments: Decimal,
    rules: &EngineRules,
    step_number: u32,
) -> PeriodAdjustments {
    let minute_value = minute_value(total_salary_before_adjustments, &rules.payroll);
    let day_value = total_salary_before_adjustments / Decimal::from(rules.payroll.days_per_month);

    let mut deductions = Decimal::ZERO;
    let mut additions = Decimal::ZERO;
    let mut events_counted = 0;
    let mut events_ignored = 0;
    let mut unjustified_absences = 0;
    let mut late_minutes = 0;
    let mut early_departure_minutes = 0;
    let mut extra_minutes = 0;

    for event in events {
        if !period.contains_date(event.date) {
            events_ignored += 1;
            continue;
        }
        events_counted += 1;

        if event.is_unjustified_absence() {
            unjustified_absences += 1;
            deductions += day_value;
        }

        let balance = calculate_time_balance(event, &rules.attendance, step_number).balance;

        if balance.late_minutes > 0 {
            late_minutes += balance.late_minutes;
            deductions += Decimal::from(balance.late_minutes) * minute_value;
        }
        if balance.early_departure_minutes > 0 {
            early_departure_minutes += balance.early_departure_minutes;
            deductions += Decimal::from(balance.early_departure_minutes) * minute_value;
        }
        if balance.extra_minutes > 0 {
            extra_minutes += balance.extra_minutes;
            additions += Decimal::from(balance.extra_minutes)
                * minute_value
                * rules.payroll.overtime_multiplier;
        }
    }

    let deductions = round_money(deductions);
    let additions = round_money(additions);

    let audit_step = AuditStep {
        step_number,
        rule_id: "period_aggregation".to_string(),
        rule_name: "Period Aggregation".to_string(),
        input: serde_json::json!({
            "period": period.to_string(),
            "total_salary_before_adjustments": total_salary_before_adjustments.to_string(),
            "events": events.len()
        }),
        output: serde_json::json!({
            "minute_value": minute_value.round_dp(4).to_string(),
            "unjustified_absences": unjustified_absences,
            "late_minutes": late_minutes,
            "early_departure_minutes": early_departure_minutes,
            "extra_minutes": extra_minutes,
            "deductions": deductions.to_string(),
            "additions": additions.to_string()
        }),
        reasoning: format!(
            "{} events in {}: {} unjustified absences, {} late + {} early minutes deducted, {} extra minutes added at {}x",
            events_counted,
            period,
            unjustified_absences,
            late_minutes,
            early_departure_minutes,
            extra_minutes,
            rules.payroll.overtime_multiplier
        ),
    };

    PeriodAdjustments {
        deductions,
        additions,
        minute_value,
        events_counted,
        events_ignored,
        unjustified_absences,
        late_minutes,
        early_departure_minutes,
        extra_minutes,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn period() -> PayPeriod {
        PayPeriod::new(3, 2025).unwrap()
    }

    fn worked(day: u32, actual: (NaiveTime, NaiveTime)) -> AttendanceEvent {
        AttendanceEvent::worked(
            &format!("att_{day}"),
            "emp_001",
            march(day),
            actual,
            (t(9, 0), t(17, 0)),
        )
    }

    // ==========================================================================
    // PA-001: ten late minutes on a 300000 salary
    // ==========================================================================
    #[test]
    fn test_pa_001_ten_late_minutes() {
        let events = vec![worked(3, (t(9, 10), t(17, 0)))];
        let result = aggregate_period(&events, period(), dec("300000"), &EngineRules::default(), 1);

        assert_eq!(result.minute_value.round_dp(4), dec("20.8333"));
        assert_eq!(result.deductions, dec("208.33"));
        assert_eq!(result.additions, Decimal::ZERO);
        assert_eq!(result.late_minutes, 10);
    }

    // ==========================================================================
    // PA-002: unjustified absence deducts a fixed 1/30 of the salary
    // ==========================================================================
    #[test]
    fn test_pa_002_unjustified_absence() {
        let events = vec![AttendanceEvent::absence("att_1", "emp_001", march(4), false)];
        let result = aggregate_period(&events, period(), dec("300000"), &EngineRules::default(), 1);

        assert_eq!(result.deductions, dec("10000"));
        assert_eq!(result.unjustified_absences, 1);
    }

    // ==========================================================================
    // PA-003: justified absence costs nothing
    // ==========================================================================
    #[test]
    fn test_pa_003_justified_absence() {
        let events = vec![AttendanceEvent::absence("att_1", "emp_001", march(4), true)];
        let result = aggregate_period(&events, period(), dec("300000"), &EngineRules::default(), 1);

        assert_eq!(result.deductions, Decimal::ZERO);
        assert_eq!(result.unjustified_absences, 0);
    }

    // ==========================================================================
    // PA-004: extra minutes are paid at 1.5x
    // ==========================================================================
    #[test]
    fn test_pa_004_extra_minutes_at_time_and_a_half() {
        // 60 extra minutes × (288000 / 14400 = 20) × 1.5 = 1800
        let events = vec![worked(5, (t(9, 0), t(18, 0)))];
        let result = aggregate_period(&events, period(), dec("288000"), &EngineRules::default(), 1);

        assert_eq!(result.additions, dec("1800"));
        assert_eq!(result.deductions, Decimal::ZERO);
        assert_eq!(result.extra_minutes, 60);
    }

    // ==========================================================================
    // PA-005: rounding happens once at the end
    // ==========================================================================
    #[test]
    fn test_pa_005_rounding_at_end_only() {
        // Each event: 1 late minute × 20.8333.. = 20.8333..; three of them = 62.50
        // Rounding per event would give 3 × 20.83 = 62.49.
        let events = vec![
            worked(3, (t(9, 1), t(17, 0))),
            worked(4, (t(9, 1), t(17, 0))),
            worked(5, (t(9, 1), t(17, 0))),
        ];
        let result = aggregate_period(&events, period(), dec("300000"), &EngineRules::default(), 1);

        assert_eq!(result.deductions, dec("62.50"));
    }

    // ==========================================================================
    // PA-006: events outside the month are ignored
    // ==========================================================================
    #[test]
    fn test_pa_006_events_outside_period_ignored() {
        let mut outside = worked(3, (t(9, 30), t(17, 0)));
        outside.date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let events = vec![outside, worked(3, (t(9, 0), t(17, 0)))];

        let result = aggregate_period(&events, period(), dec("300000"), &EngineRules::default(), 1);

        assert_eq!(result.deductions, Decimal::ZERO);
        assert_eq!(result.events_counted, 1);
        assert_eq!(result.events_ignored, 1);
    }

    // ==========================================================================
    // PA-007: stale stored minutes are recomputed
    // ==========================================================================
    #[test]
    fn test_pa_007_stale_derived_fields_are_recomputed() {
        let mut event = worked(3, (t(9, 0), t(17, 0)));
        event.balance.late_minutes = 90;

        let result = aggregate_period(&[event], period(), dec("300000"), &EngineRules::default(), 1);

        assert_eq!(result.deductions, Decimal::ZERO);
    }

    #[test]
    fn test_mixed_month() {
        // 300000: day 10000, minute 20.8333..
        // absence 10000 + late 15 (312.50) + early 30 (625.00) = 10937.50
        // extra 20 × 20.8333.. × 1.5 = 625.00
        let events = vec![
            AttendanceEvent::absence("att_a", "emp_001", march(3), false),
            worked(4, (t(9, 15), t(17, 0))),
            worked(5, (t(9, 0), t(16, 30))),
            worked(6, (t(9, 0), t(17, 20))),
        ];
        let result = aggregate_period(&events, period(), dec("300000"), &EngineRules::default(), 1);

        assert_eq!(result.deductions, dec("10937.50"));
        assert_eq!(result.additions, dec("625.00"));
    }

    #[test]
    fn test_empty_month() {
        let result = aggregate_period(&[], period(), dec("300000"), &EngineRules::default(), 3);

        assert_eq!(result.deductions, Decimal::ZERO);
        assert_eq!(result.additions, Decimal::ZERO);
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "period_aggregation");
    }
}
