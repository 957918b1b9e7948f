//! Calculation logic for the payroll engine.
//!
//! This module contains the pure calculators behind every payroll and
//! settlement figure: per-event time accounting, the bank/hand salary split,
//! monthly aggregation of attendance into money, the derived payroll totals,
//! and termination settlements. Each calculator returns its result together
//! with an [`AuditStep`](crate::models::AuditStep).

mod money;
mod payroll_totals;
mod period_aggregator;
mod salary_split;
mod settlement;
mod time_accounting;

pub use money::{MONEY_DECIMAL_PLACES, round_money};
pub use payroll_totals::{
    PayrollTotals, calculate_payroll_totals, recompute_payroll_totals, verify_payroll_totals,
};
pub use period_aggregator::{PeriodAdjustments, aggregate_period, minute_value};
pub use salary_split::{SalarySplit, split_salary};
pub use settlement::{
    SettlementBreakdown, calculate_settlement, days_to_pay_in_last_month, months_between,
    recompute_settlement_total, settlement_total,
};
pub use time_accounting::{TimeBalanceResult, apply_time_accounting, calculate_time_balance};
