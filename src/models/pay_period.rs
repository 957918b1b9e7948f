//! Pay period model.
//!
//! A [`PayPeriod`] names one calendar month. Payroll records are unique per
//! employee and period.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

#[derive(Serialize, Deserialize)]
struct PeriodKey {
    month: u32,
    year: i32,
}

/// One calendar month, with its inclusive date range.
///
/// Serializes as `{"month": .., "year": ..}`; deserialization validates the
/// pair the same way [`PayPeriod::new`] does.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(2, 2024).unwrap();
///
/// assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PeriodKey", into = "PeriodKey")]
pub struct PayPeriod {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates the period for `month` (1-12) of `year`.
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriod { month, year };

        let start_date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end_date = next_month.and_then(|d| d.pred_opt()).ok_or_else(invalid)?;

        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Returns the period containing `date`.
    pub fn containing(date: NaiveDate) -> EngineResult<Self> {
        Self::new(date.month(), date.year())
    }

    /// The calendar month, 1-12.
    pub fn month(&self) -> u32 {
        self.start_date.month()
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.start_date.year()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.start_date
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.end_date
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month(), self.year())
    }
}

impl TryFrom<PeriodKey> for PayPeriod {
    type Error = EngineError;

    fn try_from(key: PeriodKey) -> Result<Self, Self::Error> {
        PayPeriod::new(key.month, key.year)
    }
}

impl From<PayPeriod> for PeriodKey {
    fn from(period: PayPeriod) -> Self {
        PeriodKey {
            month: period.month(),
            year: period.year(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// PP-001: 31-day month range
    #[test]
    fn test_january_range() {
        let period = PayPeriod::new(1, 2025).unwrap();
        assert_eq!(period.first_day(), date(2025, 1, 1));
        assert_eq!(period.last_day(), date(2025, 1, 31));
    }

    /// PP-002: December rolls into the next year
    #[test]
    fn test_december_range() {
        let period = PayPeriod::new(12, 2025).unwrap();
        assert_eq!(period.last_day(), date(2025, 12, 31));
    }

    /// PP-003: leap February
    #[test]
    fn test_leap_february_has_29_days() {
        let period = PayPeriod::new(2, 2024).unwrap();
        assert_eq!(period.last_day(), date(2024, 2, 29));

        let period = PayPeriod::new(2, 2025).unwrap();
        assert_eq!(period.last_day(), date(2025, 2, 28));
    }

    /// PP-004: month 0 and 13 are rejected
    #[test]
    fn test_invalid_month_is_rejected() {
        for month in [0, 13] {
            match PayPeriod::new(month, 2025) {
                Err(EngineError::InvalidPeriod { month: m, year }) => {
                    assert_eq!(m, month);
                    assert_eq!(year, 2025);
                }
                other => panic!("Expected InvalidPeriod, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_contains_date_is_inclusive() {
        let period = PayPeriod::new(3, 2025).unwrap();
        assert!(period.contains_date(date(2025, 3, 1)));
        assert!(period.contains_date(date(2025, 3, 31)));
        assert!(!period.contains_date(date(2025, 2, 28)));
        assert!(!period.contains_date(date(2025, 4, 1)));
    }

    #[test]
    fn test_containing_date() {
        let period = PayPeriod::containing(date(2025, 7, 19)).unwrap();
        assert_eq!(period.month(), 7);
        assert_eq!(period.year(), 2025);
    }

    #[test]
    fn test_serializes_as_month_and_year() {
        let period = PayPeriod::new(4, 2025).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, r#"{"month":4,"year":2025}"#);

        let parsed: PayPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, period);
    }

    #[test]
    fn test_deserialize_rejects_invalid_month() {
        let result: Result<PayPeriod, _> = serde_json::from_str(r#"{"month":13,"year":2025}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(PayPeriod::new(3, 2025).unwrap().to_string(), "03/2025");
    }
}
