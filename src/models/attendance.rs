//! Attendance event model.
//!
//! This module defines [`AttendanceEvent`], one employee's attendance on one
//! calendar date, and [`TimeBalance`], the five minute fields derived from it.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// The minute fields derived from an attendance event.
///
/// Produced only by [`crate::calculation::calculate_time_balance`]; never
/// edited by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeBalance {
    /// Minutes the check-in was after the expected check-in.
    pub late_minutes: i64,
    /// Minutes the check-out was before the expected check-out.
    pub early_departure_minutes: i64,
    /// Minutes the check-out was after the expected check-out.
    pub extra_minutes: i64,
    /// Minutes between check-in and check-out.
    pub total_minutes_worked: i64,
    /// Net minutes owed to (positive) or by (negative) the employee.
    pub total_minutes_balance: i64,
}

/// Represents one employee's attendance on one date.
///
/// The derived minute fields are stored alongside the raw times so the
/// record can be listed without recomputation, but they are overwritten in
/// full whenever the event is edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// Unique identifier for the event.
    pub id: String,
    /// The employee the event belongs to.
    pub employee_id: String,
    /// The calendar date of the event.
    pub date: NaiveDate,
    /// Actual check-in time.
    #[serde(default)]
    pub check_in: Option<NaiveTime>,
    /// Actual check-out time.
    #[serde(default)]
    pub check_out: Option<NaiveTime>,
    /// Scheduled check-in time.
    #[serde(default)]
    pub expected_check_in: Option<NaiveTime>,
    /// Scheduled check-out time.
    #[serde(default)]
    pub expected_check_out: Option<NaiveTime>,
    /// The employee did not come in.
    #[serde(default)]
    pub is_absent: bool,
    /// The absence was justified (sick note, permission).
    #[serde(default)]
    pub is_justified: bool,
    /// The date is a holiday.
    #[serde(default)]
    pub is_holiday: bool,
    /// Derived minute fields.
    #[serde(flatten)]
    pub balance: TimeBalance,
}

impl AttendanceEvent {
    /// Creates a worked day with the given actual and expected times.
    ///
    /// # Examples
    ///
    /// ```
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
    /// assert!(!event.is_absent);
    /// assert_eq!(event.expected_workday_minutes(), Some(480));
    /// ```
    pub fn worked(
        id: &str,
        employee_id: &str,
        date: NaiveDate,
        actual: (NaiveTime, NaiveTime),
        expected: (NaiveTime, NaiveTime),
    ) -> Self {
        Self {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            date,
            check_in: Some(actual.0),
            check_out: Some(actual.1),
            expected_check_in: Some(expected.0),
            expected_check_out: Some(expected.1),
            is_absent: false,
            is_justified: false,
            is_holiday: false,
            balance: TimeBalance::default(),
        }
    }

    /// Creates an absence, justified or not.
    pub fn absence(id: &str, employee_id: &str, date: NaiveDate, is_justified: bool) -> Self {
        Self {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            date,
            check_in: None,
            check_out: None,
            expected_check_in: None,
            expected_check_out: None,
            is_absent: true,
            is_justified,
            is_holiday: false,
            balance: TimeBalance::default(),
        }
    }

    /// Returns true for an absence without justification.
    pub fn is_unjustified_absence(&self) -> bool {
        self.is_absent && !self.is_justified
    }

    /// Scheduled workday length, when both expected times are known.
    pub fn expected_workday_minutes(&self) -> Option<i64> {
        match (self.expected_check_in, self.expected_check_out) {
            (Some(start), Some(end)) => Some(minutes_between(start, end)),
            _ => None,
        }
    }
}

/// Signed minutes from `from` to `to` on the same (arbitrary) date.
pub(crate) fn minutes_between(from: NaiveTime, to: NaiveTime) -> i64 {
    (to - from).num_minutes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    #[test]
    fn test_minutes_between_is_signed() {
        assert_eq!(minutes_between(t(9, 0), t(17, 30)), 510);
        assert_eq!(minutes_between(t(17, 30), t(9, 0)), -510);
        assert_eq!(minutes_between(t(9, 0), t(9, 0)), 0);
    }

    #[test]
    fn test_expected_workday_requires_both_times() {
        let mut event = AttendanceEvent::worked("a", "e", d(), (t(9, 0), t(17, 0)), (t(8, 0), t(14, 0)));
        assert_eq!(event.expected_workday_minutes(), Some(360));

        event.expected_check_out = None;
        assert_eq!(event.expected_workday_minutes(), None);
    }

    #[test]
    fn test_unjustified_absence() {
        assert!(AttendanceEvent::absence("a", "e", d(), false).is_unjustified_absence());
        assert!(!AttendanceEvent::absence("a", "e", d(), true).is_unjustified_absence());
        let worked = AttendanceEvent::worked("a", "e", d(), (t(9, 0), t(17, 0)), (t(9, 0), t(17, 0)));
        assert!(!worked.is_unjustified_absence());
    }

    #[test]
    fn test_deserialize_with_flattened_balance() {
        let json = r#"{
            "id": "att_001",
            "employee_id": "emp_001",
            "date": "2025-03-03",
            "check_in": "09:15:00",
            "check_out": "17:00:00",
            "expected_check_in": "09:00:00",
            "expected_check_out": "17:00:00",
            "late_minutes": 15,
            "early_departure_minutes": 0,
            "extra_minutes": 0,
            "total_minutes_worked": 465,
            "total_minutes_balance": 450
        }"#;

        let event: AttendanceEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.check_in, Some(t(9, 15)));
        assert!(!event.is_absent);
        assert_eq!(event.balance.late_minutes, 15);
        assert_eq!(event.balance.total_minutes_balance, 450);
    }

    #[test]
    fn test_deserialize_without_derived_fields_defaults_to_zero() {
        let json = r#"{
            "id": "att_002",
            "employee_id": "emp_001",
            "date": "2025-03-04",
            "is_absent": true
        }"#;

        let event: AttendanceEvent = serde_json::from_str(json).unwrap();
        assert!(event.is_absent);
        assert_eq!(event.balance, TimeBalance::default());
    }
}
