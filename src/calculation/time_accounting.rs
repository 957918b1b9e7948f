//! Time accounting for a single attendance event.
//!
//! This module turns one [`AttendanceEvent`] into its signed minute balance
//! and the late, early-departure, extra and worked components behind it.

use crate::config::AttendanceRules;
use crate::models::{AttendanceEvent, AuditStep, TimeBalance, minutes_between};

/// The result of time accounting for one event, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBalanceResult {
    /// The derived minute fields.
    pub balance: TimeBalance,
    /// Scheduled workday length used for holiday credit.
    pub expected_workday_minutes: i64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the derived minute fields of an attendance event.
///
/// # Rules
///
/// - Absent: the balance is `-absence_penalty_minutes` (480) when the absence
///   is unjustified and `0` when justified; every other field is zero.
/// - Otherwise lateness, early departure and extra minutes come from
///   comparing actual to expected times (zero when either side is missing),
///   and worked minutes are `check_out - check_in`.
/// - Holiday: the balance is a full scheduled day plus everything worked.
/// - Regular day: `worked - late - early_departure + extra`.
///
/// The event itself is not modified; see [`apply_time_accounting`].
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_time_balance;
/// use payroll_engine::config::AttendanceRules;
/// use payroll_engine::models::AttendanceEvent;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let event = AttendanceEvent::worked(
///     "att_001",
///     "emp_001",
///     NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     (t(9, 10), t(17, 0)),
///     (t(9, 0), t(17, 0)),
/// );
///
/// let result = calculate_time_balance(&event, &AttendanceRules::default(), 1);
/// assert_eq!(result.balance.late_minutes, 10);
/// assert_eq!(result.balance.total_minutes_worked, 470);
/// assert_eq!(result.balance.total_minutes_balance, 460);
/// ```
pub fn calculate_time_balance(
    event: &AttendanceEvent,
    rules: &AttendanceRules,
    step_number: u32,
) -> TimeBalanceResult {
    let expected_workday_minutes = event
        .expected_workday_minutes()
        .unwrap_or(rules.standard_workday_minutes);

    let (balance, reasoning) = if event.is_absent {
        let total_minutes_balance = if event.is_justified {
            0
        } else {
            -rules.absence_penalty_minutes
        };
        let reasoning = if event.is_justified {
            "Justified absence, balance 0".to_string()
        } else {
            format!(
                "Unjustified absence, balance -{} minutes",
                rules.absence_penalty_minutes
            )
        };
        (
            TimeBalance {
                total_minutes_balance,
                ..TimeBalance::default()
            },
            reasoning,
        )
    } else {
        let late_minutes = match (event.check_in, event.expected_check_in) {
            (Some(actual), Some(expected)) => minutes_between(expected, actual).max(0),
            _ => 0,
        };
        let (early_departure_minutes, extra_minutes) =
            match (event.check_out, event.expected_check_out) {
                (Some(actual), Some(expected)) => {
                    let delta = minutes_between(expected, actual);
                    ((-delta).max(0), delta.max(0))
                }
                _ => (0, 0),
            };
        let total_minutes_worked = match (event.check_in, event.check_out) {
            (Some(start), Some(end)) => minutes_between(start, end),
            _ => 0,
        };

        let total_minutes_balance = if event.is_holiday {
            expected_workday_minutes + total_minutes_worked
        } else {
            total_minutes_worked - late_minutes - early_departure_minutes + extra_minutes
        };

        let reasoning = if event.is_holiday {
            format!(
                "Holiday: {} scheduled + {} worked = {} minutes",
                expected_workday_minutes, total_minutes_worked, total_minutes_balance
            )
        } else {
            format!(
                "{} worked - {} late - {} early + {} extra = {} minutes",
                total_minutes_worked,
                late_minutes,
                early_departure_minutes,
                extra_minutes,
                total_minutes_balance
            )
        };

        (
            TimeBalance {
                late_minutes,
                early_departure_minutes,
                extra_minutes,
                total_minutes_worked,
                total_minutes_balance,
            },
            reasoning,
        )
    };

    let fmt_time = |t: Option<chrono::NaiveTime>| t.map(|t| t.format("%H:%M").to_string());

    let audit_step = AuditStep {
        step_number,
        rule_id: "time_accounting".to_string(),
        rule_name: "Time Accounting".to_string(),
        input: serde_json::json!({
            "event_id": event.id,
            "date": event.date.to_string(),
            "check_in": fmt_time(event.check_in),
            "check_out": fmt_time(event.check_out),
            "expected_check_in": fmt_time(event.expected_check_in),
            "expected_check_out": fmt_time(event.expected_check_out),
            "is_absent": event.is_absent,
            "is_justified": event.is_justified,
            "is_holiday": event.is_holiday
        }),
        output: serde_json::to_value(balance).unwrap_or_default(),
        reasoning,
    };

    TimeBalanceResult {
        balance,
        expected_workday_minutes,
        audit_step,
    }
}

/// Recomputes and stores the derived fields of an event.
///
/// Absent events also have their check-in and check-out cleared. Applying
/// this twice leaves the event unchanged the second time.
pub fn apply_time_accounting(event: &mut AttendanceEvent, rules: &AttendanceRules) -> TimeBalance {
    let result = calculate_time_balance(event, rules, 1);
    if event.is_absent {
        event.check_in = None;
        event.check_out = None;
    }
    event.balance = result.balance;
    result.balance
}
