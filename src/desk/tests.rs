use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::error::AppError;
use crate::models::{AttendanceStatus, EmploymentType};
use crate::store::{FaultyStore, MemoryStore, load_json};

fn draft(name: &str, salary: &str) -> EmployeeDraft {
    EmployeeDraft {
        name: name.into(),
        position: "Clerk".into(),
        department: "Finance".into(),
        salary: salary.into(),
        contact: "+27821234567".into(),
        employment_type: "Part-Time".into(),
    }
}

fn leave_form(start: &str, end: &str) -> LeaveForm {
    LeaveForm {
        employee_name: "Noor Smith".into(),
        start_date: start.into(),
        end_date: end.into(),
        reason: "Family event".into(),
    }
}

fn seeded() -> Desk<MemoryStore> {
    Desk::open(MemoryStore::new()).unwrap()
}

#[test]
fn test_open_writes_seeded_ledgers_back() {
    let desk = seeded();
    let store = desk.store();
    for key in [
        keys::EMPLOYEES,
        keys::ATTENDANCE,
        keys::LEAVE_REQUESTS,
        keys::PERFORMANCE_REVIEWS,
    ] {
        assert!(store.get(key).unwrap().is_some(), "{key} not written");
    }
    assert_eq!(store.get(keys::TOTAL_PAYROLL).unwrap(), None);
    assert_eq!(desk.employees().len(), 10);
    assert!(desk.leave().is_empty());
    assert_eq!(store.get(keys::LEAVE_REQUESTS).unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_open_keeps_persisted_data() {
    let mut store = MemoryStore::new();
    store.set(keys::EMPLOYEES, "[]").unwrap();
    let desk = Desk::open(store).unwrap();
    assert!(desk.employees().is_empty());
    assert_eq!(desk.store().get(keys::EMPLOYEES).unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_employee_mutations_persist() {
    let mut desk = seeded();

    let added = desk.add_employee(&draft("Lerato Mokoena", "18000")).unwrap();
    assert_eq!(added.employee_id, 11);
    assert_eq!(added.employment_type, EmploymentType::PartTime);

    let stored: Vec<EmployeeRecord> = load_json(desk.store(), keys::EMPLOYEES).unwrap().unwrap();
    assert_eq!(stored.len(), 11);
    assert_eq!(stored.last().unwrap().name, "Lerato Mokoena");

    let updated = desk.update_employee(11, &draft("Lerato M.", "19000")).unwrap().unwrap();
    assert_eq!(updated.salary, 19000.0);
    assert!(desk.update_employee(404, &draft("Ghost", "1")).unwrap().is_none());

    assert!(desk.remove_employee(11).unwrap());
    let stored: Vec<EmployeeRecord> = load_json(desk.store(), keys::EMPLOYEES).unwrap().unwrap();
    assert_eq!(stored.len(), 10);
    assert!(stored.iter().all(|e| e.employee_id != 11));
}

#[test]
fn test_rejected_employee_leaves_store_untouched() {
    let mut desk = seeded();
    let before = desk.store().get(keys::EMPLOYEES).unwrap();

    let err = desk.add_employee(&draft("Bad Salary", "abc")).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(desk.store().get(keys::EMPLOYEES).unwrap(), before);
}

#[test]
fn test_leave_flow_persists_and_reloads() {
    let mut desk = seeded();
    let request = desk.submit_leave(&leave_form("2025-07-01", "2025-07-03")).unwrap();
    assert_eq!(request.status, LeaveStatus::Pending);

    let index = desk.leave().len() - 1;
    desk.approve_leave(index).unwrap();
    assert!(matches!(desk.deny_leave(index), Err(AppError::InvalidTransition(_))));

    let reopened = Desk::open(desk.into_store()).unwrap();
    assert_eq!(reopened.leave().len(), 1);
    assert_eq!(reopened.leave().get(index).unwrap().status, LeaveStatus::Approved);
}

#[test]
fn test_cleared_leave_stays_cleared_after_reopen() {
    let mut desk = seeded();
    desk.submit_leave(&leave_form("2025-07-01", "2025-07-02")).unwrap();
    desk.submit_leave(&leave_form("2025-08-01", "2025-08-02")).unwrap();

    assert_eq!(desk.clear_leave().unwrap(), 2);
    assert!(desk.leave().is_empty());
    assert_eq!(desk.store().get(keys::LEAVE_REQUESTS).unwrap(), None);
    assert_eq!(desk.recompute().time_off, Default::default());

    let reopened = Desk::open(desk.into_store()).unwrap();
    assert!(reopened.leave().is_empty());
    assert_eq!(reopened.recompute().time_off, Default::default());
}

#[test]
fn test_metrics_follow_mutations() {
    let mut desk = seeded();
    let before = desk.recompute();
    assert_eq!(before.total_employees, 10);
    assert_eq!(before.total_payroll, 0.0);
    assert_eq!(before.time_off.pending, 0);

    desk.add_employee(&draft("New Hire", "1000")).unwrap();
    desk.submit_leave(&leave_form("2025-08-01", "2025-08-01")).unwrap();

    let after = desk.recompute();
    assert_eq!(after.total_employees, 11);
    assert_eq!(after.time_off.pending, 1);
    assert_eq!(after.employee_categories.part_time, before.employee_categories.part_time + 1);
}

#[test]
fn test_simulated_attendance_is_persisted() {
    let mut desk = seeded();
    let mut rng = StdRng::seed_from_u64(7);
    let assigned = desk.simulate_demo_attendance(&mut rng).unwrap();
    assert_eq!(assigned, 10 * desk.attendance().date_range().len());

    let stored: Vec<crate::models::AttendanceRecord> = load_json(desk.store(), keys::ATTENDANCE).unwrap().unwrap();
    assert_eq!(stored, desk.attendance().records());

    let present = stored
        .iter()
        .flat_map(|r| r.attendance.values())
        .filter(|s| **s == AttendanceStatus::Present)
        .count();
    let expected = metrics::attendance_percent(present, assigned);
    assert_eq!(desk.recompute().overall_attendance_percent, expected);
}

#[test]
fn test_payroll_sync_and_override() {
    let mut desk = seeded();
    let total = desk.sync_payroll().unwrap();
    assert_eq!(total, desk.employees().total_salaries());
    assert_eq!(desk.recompute().total_payroll, total);

    desk.set_total_payroll(1234.5).unwrap();
    assert_eq!(desk.total_payroll(), 1234.5);

    let err = desk.set_total_payroll(-1.0).unwrap_err();
    assert!(err.field_errors().unwrap().contains("totalPayroll"));
    assert!(desk.set_total_payroll(f64::NAN).is_err());
    assert_eq!(desk.total_payroll(), 1234.5);
}

#[test]
fn test_add_review_persists() {
    let mut desk = seeded();
    let review = desk
        .add_review(ReviewForm {
            name: "Noor Smith".into(),
            role: "Accountant".into(),
            department: "Finance".into(),
            performance_rating: "Excellent".into(),
            attendance: "98%".into(),
            peer_feedback: "Reliable".into(),
            review_date: "2025-07-01".into(),
            reviewer: "Kouthar Davids".into(),
        })
        .unwrap();
    assert_eq!(review.id, 6);

    let stored: Vec<PerformanceReview> = load_json(desk.store(), keys::PERFORMANCE_REVIEWS).unwrap().unwrap();
    assert_eq!(stored.len(), 6);
}

#[test]
fn test_unreadable_store_fails_open_without_writing() {
    let mut inner = MemoryStore::new();
    inner.set(keys::EMPLOYEES, "[]").unwrap();
    let mut store = FaultyStore::over(inner);
    store.fail_reads = true;

    assert!(matches!(Desk::open(store.clone()), Err(AppError::Io(_))));
    assert_eq!(store.inner.get(keys::EMPLOYEES).unwrap().as_deref(), Some("[]"));
    assert_eq!(store.inner.len(), 1);
}

#[test]
fn test_failed_save_leaves_ledgers_unchanged() {
    let mut desk = Desk::open(FaultyStore::default()).unwrap();
    desk.submit_leave(&leave_form("2025-07-01", "2025-07-02")).unwrap();
    let roster_before = desk.store().inner.get(keys::EMPLOYEES).unwrap();
    let next_id = desk.employees().next_id();

    desk.store.fail_writes = true;

    assert!(desk.add_employee(&draft("Lerato Mokoena", "18000")).is_err());
    assert_eq!(desk.employees().len(), 10);
    assert_eq!(desk.employees().next_id(), next_id);
    assert!(desk.update_employee(1, &draft("Renamed", "1")).is_err());
    assert_eq!(desk.employees().get(1).unwrap().name, "Kouthar Davids");
    assert!(desk.remove_employee(1).is_err());
    assert!(desk.employees().get(1).is_some());
    assert_eq!(desk.store().inner.get(keys::EMPLOYEES).unwrap(), roster_before);

    assert!(desk.approve_leave(0).is_err());
    assert_eq!(desk.leave().get(0).unwrap().status, LeaveStatus::Pending);
    assert!(desk.submit_leave(&leave_form("2025-09-01", "2025-09-02")).is_err());
    assert!(desk.clear_leave().is_err());
    assert_eq!(desk.leave().len(), 1);

    let mut rng = StdRng::seed_from_u64(1);
    let attendance_before = desk.attendance().records().to_vec();
    assert!(desk.simulate_demo_attendance(&mut rng).is_err());
    assert_eq!(desk.attendance().records(), attendance_before.as_slice());

    desk.store.fail_writes = false;
    assert_eq!(desk.add_employee(&draft("Lerato Mokoena", "18000")).unwrap().employee_id, next_id);
}

#[test]
fn test_removed_id_not_reissued_after_reopen() {
    let mut desk = seeded();
    let added = desk.add_employee(&draft("Temp", "100")).unwrap();
    assert!(desk.remove_employee(added.employee_id).unwrap());

    let mut reopened = Desk::open(desk.into_store()).unwrap();
    let next = reopened.add_employee(&draft("Permanent", "200")).unwrap();
    assert_eq!(next.employee_id, added.employee_id + 1);
}
