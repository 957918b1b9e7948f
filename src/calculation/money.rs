//! Money rounding shared by the calculators.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places stored for money values.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds a money value to cents, halves away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("208.3333").unwrap()), Decimal::from_str("208.33").unwrap());
/// assert_eq!(round_money(Decimal::from_str("0.125").unwrap()), Decimal::from_str("0.13").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
