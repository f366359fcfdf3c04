//! The desk: one store plus one in-memory holder per ledger.
//!
//! Every mutation goes through the desk. It is applied to a copy of the touched
//! ledger, the copy is written to the store, and only then does it replace the
//! in-memory ledger. A failed write leaves both sides as they were. Metrics are recomputed from the store on
//! request via [`Desk::recompute`].

use rand::Rng;
use tracing::info;

use crate::attendance::AttendanceLedger;
use crate::employees::EmployeeRepository;
use crate::error::Result;
use crate::leave::LeaveLedger;
use crate::metrics::{self, DashboardMetrics};
use crate::models::{EmployeeDraft, EmployeeRecord, LeaveForm, LeaveRequest, LeaveStatus, PerformanceReview, ReviewForm};
use crate::reviews::ReviewBoard;
use crate::store::{self, Origin, Store, keys};
use crate::validation::FieldErrors;

#[cfg(test)]
mod tests;

pub struct Desk<S: Store> {
    store: S,
    employees: EmployeeRepository,
    attendance: AttendanceLedger,
    leave: LeaveLedger,
    reviews: ReviewBoard,
}

impl<S: Store> Desk<S> {
    /// Load every ledger, seeding from fixtures and writing the seed back where the store had nothing usable.
    ///
    /// A store that cannot be read fails the open before anything is written.
    pub fn open(mut store: S) -> Result<Self> {
        let (employees, origin) = EmployeeRepository::load(&store)?;
        if origin == Origin::Seeded {
            employees.save(&mut store)?;
        }

        let (attendance, origin) = AttendanceLedger::load(&store)?;
        if origin == Origin::Seeded {
            attendance.save(&mut store)?;
        }

        let (leave, origin) = LeaveLedger::load(&store)?;
        if origin == Origin::Seeded {
            leave.save(&mut store)?;
        }

        let (reviews, origin) = ReviewBoard::load(&store)?;
        if origin == Origin::Seeded {
            reviews.save(&mut store)?;
        }

        info!(
            "Desk ready: {} employees, {} attendance logs, {} leave requests, {} reviews",
            employees.len(),
            attendance.records().len(),
            leave.len(),
            reviews.list().len()
        );

        Ok(Self {
            store,
            employees,
            attendance,
            leave,
            reviews,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn employees(&self) -> &EmployeeRepository {
        &self.employees
    }

    pub fn attendance(&self) -> &AttendanceLedger {
        &self.attendance
    }

    pub fn leave(&self) -> &LeaveLedger {
        &self.leave
    }

    pub fn reviews(&self) -> &ReviewBoard {
        &self.reviews
    }

    /// Fresh dashboard numbers read back from the store.
    pub fn recompute(&self) -> DashboardMetrics {
        DashboardMetrics::compute(&self.store)
    }

    pub fn add_employee(&mut self, draft: &EmployeeDraft) -> Result<EmployeeRecord> {
        let mut next = self.employees.clone();
        let record = next.add(draft)?.clone();
        next.save(&mut self.store)?;
        self.employees = next;
        Ok(record)
    }

    pub fn update_employee(&mut self, id: u32, draft: &EmployeeDraft) -> Result<Option<EmployeeRecord>> {
        let mut next = self.employees.clone();
        let Some(record) = next.update(id, draft)?.cloned() else {
            return Ok(None);
        };
        next.save(&mut self.store)?;
        self.employees = next;
        Ok(Some(record))
    }

    /// Remove an employee. Their attendance and leave entries stay behind.
    pub fn remove_employee(&mut self, id: u32) -> Result<bool> {
        let mut next = self.employees.clone();
        let removed = next.remove(id);
        next.save(&mut self.store)?;
        self.employees = next;
        Ok(removed)
    }

    /// Replace all attendance with random demo data. Not for production records.
    pub fn simulate_demo_attendance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize> {
        let mut next = self.attendance.clone();
        let assigned = next.simulate_demo_data(rng);
        next.save(&mut self.store)?;
        self.attendance = next;
        Ok(assigned)
    }

    pub fn submit_leave(&mut self, form: &LeaveForm) -> Result<LeaveRequest> {
        let mut next = self.leave.clone();
        let request = next.submit(form)?.clone();
        next.save(&mut self.store)?;
        self.leave = next;
        Ok(request)
    }

    pub fn set_leave_status(&mut self, index: usize, status: LeaveStatus) -> Result<LeaveRequest> {
        let mut next = self.leave.clone();
        let request = next.set_status(index, status)?.clone();
        next.save(&mut self.store)?;
        self.leave = next;
        Ok(request)
    }

    pub fn approve_leave(&mut self, index: usize) -> Result<LeaveRequest> {
        self.set_leave_status(index, LeaveStatus::Approved)
    }

    pub fn deny_leave(&mut self, index: usize) -> Result<LeaveRequest> {
        self.set_leave_status(index, LeaveStatus::Denied)
    }

    /// Empty the leave ledger and its persisted copy. Returns how many requests were dropped.
    pub fn clear_leave(&mut self) -> Result<usize> {
        self.leave.clear_all(&mut self.store)
    }

    pub fn add_review(&mut self, form: ReviewForm) -> Result<PerformanceReview> {
        let mut next = self.reviews.clone();
        let review = next.add(form)?.clone();
        next.save(&mut self.store)?;
        self.reviews = next;
        Ok(review)
    }

    /// Current persisted payroll total.
    pub fn total_payroll(&self) -> f64 {
        metrics::total_payroll(&self.store)
    }

    /// Overwrite the payroll total fed to the dashboard.
    pub fn set_total_payroll(&mut self, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            let mut errors = FieldErrors::new();
            errors.insert("totalPayroll", "Payroll must be a non-negative number");
            return Err(errors.into());
        }
        store::save_json(&mut self.store, keys::TOTAL_PAYROLL, &amount)?;
        info!("Total payroll set to {:.2}", amount);
        Ok(())
    }

    /// Set the payroll total to the sum of roster salaries.
    pub fn sync_payroll(&mut self) -> Result<f64> {
        let total = self.employees.total_salaries();
        self.set_total_payroll(total)?;
        Ok(total)
    }
}
