//! Dashboard metrics derived from persisted ledger snapshots.
//!
//! Nothing is cached: every call re-reads the store and recomputes all values.
//! A missing or malformed snapshot contributes zeros.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::attendance::AttendanceLedger;
use crate::leave::LeaveLedger;
use crate::models::{AttendanceRecord, CategoryCounts, EmployeeRecord, LeaveCounts, LeaveRequest};
use crate::store::{Store, keys, load_json};

/// Values shown on the overview screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_employees: usize,
    /// Share of recorded days marked Present, one decimal place.
    pub overall_attendance_percent: f64,
    pub total_payroll: f64,
    pub time_off: LeaveCounts,
    pub employee_categories: CategoryCounts,
}

impl DashboardMetrics {
    pub fn compute<S: Store + ?Sized>(store: &S) -> Self {
        let employees: Vec<EmployeeRecord> = snapshot(store, keys::EMPLOYEES);
        let attendance = AttendanceLedger::new(snapshot::<Vec<AttendanceRecord>, _>(store, keys::ATTENDANCE));
        let leave = LeaveLedger::new(snapshot::<Vec<LeaveRequest>, _>(store, keys::LEAVE_REQUESTS));

        Self {
            total_employees: employees.len(),
            overall_attendance_percent: attendance_percent(attendance.total_present_days(), attendance.total_days()),
            total_payroll: total_payroll(store),
            time_off: leave.counts_by_status(),
            employee_categories: CategoryCounts::tally(employees.iter().map(|e| &e.employment_type)),
        }
    }
}

/// Decoded snapshot, or the empty value when it is absent, malformed or unreadable.
fn snapshot<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: Store + ?Sized,
{
    match load_json(store, key) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            warn!("Failed to read {key} for metrics: {e}");
            T::default()
        }
    }
}

/// Persisted payroll total, 0 when absent or unreadable.
///
/// Accepts a JSON number or a numeric string.
pub fn total_payroll<S: Store + ?Sized>(store: &S) -> f64 {
    let raw: Value = snapshot(store, keys::TOTAL_PAYROLL);
    payroll_amount(&raw).unwrap_or(0.0)
}

fn payroll_amount(raw: &Value) -> Option<f64> {
    let amount = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    amount.is_finite().then_some(amount)
}

/// `present / total * 100` rounded to one decimal; 0 when there are no days.
pub fn attendance_percent(present: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(present as f64 / total as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
