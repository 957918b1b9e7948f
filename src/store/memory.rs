//! In-memory implementation of [`PayrollStore`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{
    AttendanceEvent, Employee, EmployeeStatus, LiquidationRecord, PayPeriod, PayrollDetail,
    PayrollRecord,
};

use super::{PayrollStore, StoreError, StoreResult};

/// A [`PayrollStore`] backed by ordered maps.
///
/// Enforces the same uniqueness a database index would: one payroll record
/// per employee and month, one settlement per employee, and detail lines
/// only for existing payroll records.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Employee, EmployeeStatus};
/// use payroll_engine::store::{InMemoryStore, PayrollStore};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut store = InMemoryStore::new();
/// store.add_employee(Employee {
///     id: "emp_001".to_string(),
///     name: "Ana".to_string(),
///     base_salary: Decimal::from(300000),
///     bank_salary: Decimal::from(100000),
///     hire_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
///     termination_date: None,
///     status: EmployeeStatus::Active,
/// });
///
/// assert!(store.find_employee("emp_001").unwrap().is_some());
/// assert_eq!(store.list_employees(EmployeeStatus::Inactive).unwrap().len(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    employees: BTreeMap<String, Employee>,
    attendance: Vec<AttendanceEvent>,
    payrolls: BTreeMap<Uuid, PayrollRecord>,
    details: Vec<PayrollDetail>,
    liquidations: BTreeMap<String, LiquidationRecord>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee.
    pub fn add_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Adds an attendance event.
    pub fn add_attendance(&mut self, event: AttendanceEvent) {
        self.attendance.push(event);
    }

    /// Number of stored payroll records.
    pub fn payroll_count(&self) -> usize {
        self.payrolls.len()
    }

    /// Number of stored settlements.
    pub fn liquidation_count(&self) -> usize {
        self.liquidations.len()
    }

    fn period_key(employee_id: &str, month: u32, year: i32) -> String {
        format!("{} {:02}/{}", employee_id, month, year)
    }

    fn payroll_clash(&self, record: &PayrollRecord) -> Option<&PayrollRecord> {
        self.payrolls.values().find(|existing| {
            existing.id != record.id
                && existing.employee_id == record.employee_id
                && existing.month == record.month
                && existing.year == record.year
        })
    }

    fn sorted(mut records: Vec<PayrollRecord>) -> Vec<PayrollRecord> {
        records.sort_by(|a, b| {
            (&a.employee_id, a.year, a.month).cmp(&(&b.employee_id, b.year, b.month))
        });
        records
    }
}

impl PayrollStore for InMemoryStore {
    fn list_employees(&self, status: EmployeeStatus) -> StoreResult<Vec<Employee>> {
        Ok(self
            .employees
            .values()
            .filter(|e| e.status == status)
            .cloned()
            .collect())
    }

    fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        Ok(self.employees.get(employee_id).cloned())
    }

    fn list_attendance(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<AttendanceEvent>> {
        let mut events: Vec<AttendanceEvent> = self
            .attendance
            .iter()
            .filter(|e| e.employee_id == employee_id && e.date >= from && e.date <= to)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.date);
        Ok(events)
    }

    fn find_payroll(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> StoreResult<Option<PayrollRecord>> {
        Ok(self
            .payrolls
            .values()
            .find(|r| r.employee_id == employee_id && r.is_in_period(period))
            .cloned())
    }

    fn get_payroll(&self, payroll_id: Uuid) -> StoreResult<Option<PayrollRecord>> {
        Ok(self.payrolls.get(&payroll_id).cloned())
    }

    fn latest_payroll(&self, employee_id: &str) -> StoreResult<Option<PayrollRecord>> {
        Ok(self
            .payrolls
            .values()
            .filter(|r| r.employee_id == employee_id)
            .max_by_key(|r| (r.year, r.month))
            .cloned())
    }

    fn insert_payroll(&mut self, record: PayrollRecord) -> StoreResult<PayrollRecord> {
        if self.payrolls.contains_key(&record.id) || self.payroll_clash(&record).is_some() {
            return Err(StoreError::Conflict {
                operation: "insert_payroll".to_string(),
                key: Self::period_key(&record.employee_id, record.month, record.year),
            });
        }
        self.payrolls.insert(record.id, record.clone());
        Ok(record)
    }

    fn update_payroll(&mut self, record: &PayrollRecord) -> StoreResult<()> {
        if !self.payrolls.contains_key(&record.id) {
            return Err(StoreError::NotFound {
                operation: "update_payroll".to_string(),
                key: record.id.to_string(),
            });
        }
        if self.payroll_clash(record).is_some() {
            return Err(StoreError::Conflict {
                operation: "update_payroll".to_string(),
                key: Self::period_key(&record.employee_id, record.month, record.year),
            });
        }
        self.payrolls.insert(record.id, record.clone());
        Ok(())
    }

    fn insert_payroll_detail(&mut self, detail: PayrollDetail) -> StoreResult<()> {
        if !self.payrolls.contains_key(&detail.payroll_id) {
            return Err(StoreError::Rejected {
                operation: "insert_payroll_detail".to_string(),
                message: format!("unknown payroll {}", detail.payroll_id),
            });
        }
        self.details.push(detail);
        Ok(())
    }

    fn list_payroll_details(&self, payroll_id: Uuid) -> StoreResult<Vec<PayrollDetail>> {
        Ok(self
            .details
            .iter()
            .filter(|d| d.payroll_id == payroll_id)
            .cloned()
            .collect())
    }

    fn delete_payroll_details(&mut self, payroll_id: Uuid) -> StoreResult<usize> {
        let before = self.details.len();
        self.details.retain(|d| d.payroll_id != payroll_id);
        Ok(before - self.details.len())
    }

    fn list_payrolls(
        &self,
        period: PayPeriod,
        is_paid: Option<bool>,
    ) -> StoreResult<Vec<PayrollRecord>> {
        let records = self
            .payrolls
            .values()
            .filter(|r| r.is_in_period(period))
            .filter(|r| is_paid.is_none_or(|paid| r.is_paid == paid))
            .cloned()
            .collect();
        Ok(Self::sorted(records))
    }

    fn find_liquidation(&self, employee_id: &str) -> StoreResult<Option<LiquidationRecord>> {
        Ok(self.liquidations.get(employee_id).cloned())
    }

    fn insert_liquidation(
        &mut self,
        record: LiquidationRecord,
    ) -> StoreResult<LiquidationRecord> {
        if self.liquidations.contains_key(&record.employee_id) {
            return Err(StoreError::Conflict {
                operation: "insert_liquidation".to_string(),
                key: record.employee_id.clone(),
            });
        }
        self.liquidations
            .insert(record.employee_id.clone(), record.clone());
        Ok(record)
    }

    fn update_liquidation(&mut self, record: &LiquidationRecord) -> StoreResult<()> {
        match self.liquidations.get_mut(&record.employee_id) {
            Some(existing) if existing.id == record.id => {
                *existing = record.clone();
                Ok(())
            }
            _ => Err(StoreError::NotFound {
                operation: "update_liquidation".to_string(),
                key: record.employee_id.clone(),
            }),
        }
    }

    fn list_liquidations(&self, is_paid: Option<bool>) -> StoreResult<Vec<LiquidationRecord>> {
        Ok(self
            .liquidations
            .values()
            .filter(|r| is_paid.is_none_or(|paid| r.is_paid == paid))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DetailKind;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payroll(employee_id: &str, month: u32, year: i32) -> PayrollRecord {
        PayrollRecord {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            month,
            year,
            base_salary: dec("300000"),
            bank_salary: dec("100000"),
            hand_salary: dec("200000"),
            deductions: Decimal::ZERO,
            additions: Decimal::ZERO,
            has_attendance_bonus: false,
            attendance_bonus: Decimal::ZERO,
            final_hand_salary: dec("200000"),
            total_salary: dec("300000"),
            is_paid_hand: false,
            hand_payment_date: None,
            is_paid_bank: false,
            bank_payment_date: None,
            is_paid: false,
            payment_method: None,
            payment_reference: None,
            payment_date: None,
        }
    }

    fn liquidation(employee_id: &str) -> LiquidationRecord {
        LiquidationRecord {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            termination_date: date(2025, 4, 6),
            worked_days: 95,
            worked_months: 3,
            days_to_pay_in_last_month: 5,
            base_salary: dec("300000"),
            last_month_payment: dec("50000"),
            proportional_vacation: dec("30000"),
            proportional_bonus: dec("75000"),
            severance_pay: Decimal::ZERO,
            total_amount: dec("155000"),
            include_vacation: true,
            include_bonus: true,
            is_paid: false,
            payment_date: None,
            payment_method: None,
            payment_reference: None,
            payment_notes: None,
        }
    }

    #[test]
    fn test_duplicate_payroll_period_conflicts() {
        let mut store = InMemoryStore::new();
        store.insert_payroll(payroll("emp_001", 3, 2025)).unwrap();

        let result = store.insert_payroll(payroll("emp_001", 3, 2025));
        assert!(matches!(result, Err(StoreError::Conflict { .. })));
        assert_eq!(store.payroll_count(), 1);

        // Same employee, other month is fine
        store.insert_payroll(payroll("emp_001", 4, 2025)).unwrap();
        assert_eq!(store.payroll_count(), 2);
    }

    #[test]
    fn test_update_unknown_payroll_is_not_found() {
        let mut store = InMemoryStore::new();
        let result = store.update_payroll(&payroll("emp_001", 3, 2025));
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_latest_payroll_orders_by_year_then_month() {
        let mut store = InMemoryStore::new();
        store.insert_payroll(payroll("emp_001", 12, 2024)).unwrap();
        store.insert_payroll(payroll("emp_001", 2, 2025)).unwrap();
        store.insert_payroll(payroll("emp_001", 11, 2024)).unwrap();

        let latest = store.latest_payroll("emp_001").unwrap().unwrap();
        assert_eq!((latest.month, latest.year), (2, 2025));
        assert!(store.latest_payroll("emp_002").unwrap().is_none());
    }

    #[test]
    fn test_list_payrolls_filters_period_and_paid() {
        let mut store = InMemoryStore::new();
        let mut paid = payroll("emp_002", 3, 2025);
        paid.is_paid = true;
        store.insert_payroll(paid).unwrap();
        store.insert_payroll(payroll("emp_001", 3, 2025)).unwrap();
        store.insert_payroll(payroll("emp_001", 4, 2025)).unwrap();

        let period = PayPeriod::new(3, 2025).unwrap();
        let all = store.list_payrolls(period, None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].employee_id, "emp_001");

        assert_eq!(store.list_payrolls(period, Some(true)).unwrap().len(), 1);
        assert_eq!(store.list_payrolls(period, Some(false)).unwrap().len(), 1);
    }

    #[test]
    fn test_details_require_existing_payroll() {
        let mut store = InMemoryStore::new();
        let record = store.insert_payroll(payroll("emp_001", 3, 2025)).unwrap();

        let orphan = PayrollDetail::new(Uuid::new_v4(), DetailKind::Deduction, "x", dec("1"));
        assert!(matches!(
            store.insert_payroll_detail(orphan),
            Err(StoreError::Rejected { .. })
        ));

        store
            .insert_payroll_detail(PayrollDetail::new(
                record.id,
                DetailKind::Addition,
                "Horas extra",
                dec("625"),
            ))
            .unwrap();
        assert_eq!(store.list_payroll_details(record.id).unwrap().len(), 1);
        assert_eq!(store.delete_payroll_details(record.id).unwrap(), 1);
        assert!(store.list_payroll_details(record.id).unwrap().is_empty());
    }

    #[test]
    fn test_attendance_range_is_inclusive_and_sorted() {
        let mut store = InMemoryStore::new();
        store.add_attendance(AttendanceEvent::absence("a3", "emp_001", date(2025, 3, 31), false));
        store.add_attendance(AttendanceEvent::absence("a1", "emp_001", date(2025, 3, 1), false));
        store.add_attendance(AttendanceEvent::absence("a0", "emp_001", date(2025, 2, 28), false));
        store.add_attendance(AttendanceEvent::absence("b1", "emp_002", date(2025, 3, 5), false));

        let events = store
            .list_attendance("emp_001", date(2025, 3, 1), date(2025, 3, 31))
            .unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a3"]);
    }

    #[test]
    fn test_one_liquidation_per_employee() {
        let mut store = InMemoryStore::new();
        store.insert_liquidation(liquidation("emp_001")).unwrap();

        let result = store.insert_liquidation(liquidation("emp_001"));
        assert!(matches!(result, Err(StoreError::Conflict { .. })));
        assert_eq!(store.liquidation_count(), 1);
    }

    #[test]
    fn test_update_liquidation_requires_matching_id() {
        let mut store = InMemoryStore::new();
        let mut stored = store.insert_liquidation(liquidation("emp_001")).unwrap();

        stored.is_paid = true;
        store.update_liquidation(&stored).unwrap();
        assert_eq!(store.list_liquidations(Some(true)).unwrap().len(), 1);

        let stranger = liquidation("emp_001");
        assert!(matches!(
            store.update_liquidation(&stranger),
            Err(StoreError::NotFound { .. })
        ));
    }
}
