//! Leave request ledger.
//!
//! Requests are kept in submission order and addressed by position. A request
//! starts `Pending` and may move once, to `Approved` or `Denied`.

use tracing::{debug, info};

use crate::employees::EmployeeRepository;
use crate::error::{AppError, Result};
use crate::models::{EmployeeRecord, LeaveCounts, LeaveForm, LeaveRequest, LeaveStatus};
use crate::store::{self, Origin, Store, keys};
use crate::validation::accept_leave;

#[derive(Debug, Clone, Default)]
pub struct LeaveLedger {
    requests: Vec<LeaveRequest>,
}

impl LeaveLedger {
    pub fn new(requests: Vec<LeaveRequest>) -> Self {
        Self { requests }
    }

    /// Load persisted requests. With nothing usable stored the ledger starts empty.
    pub fn load<S: Store + ?Sized>(store: &S) -> Result<(Self, Origin)> {
        match store::load_json::<Vec<LeaveRequest>, _>(store, keys::LEAVE_REQUESTS)? {
            Some(requests) => {
                debug!("Loaded {} leave requests from store", requests.len());
                Ok((Self::new(requests), Origin::Persisted))
            }
            None => Ok((Self::default(), Origin::Seeded)),
        }
    }

    pub fn save<S: Store + ?Sized>(&self, store: &mut S) -> Result<()> {
        store::save_json(store, keys::LEAVE_REQUESTS, &self.requests)
    }

    /// Validate and append a new `Pending` request.
    ///
    /// A request ending before it starts is rejected with [`AppError::DateRange`].
    pub fn submit(&mut self, form: &LeaveForm) -> Result<&LeaveRequest> {
        let accepted = accept_leave(form)?;
        if accepted.start_date > accepted.end_date {
            return Err(AppError::DateRange);
        }

        self.requests.push(LeaveRequest {
            employee_name: form.employee_name.clone(),
            start_date: accepted.start_date,
            end_date: accepted.end_date,
            reason: form.reason.clone(),
            status: LeaveStatus::Pending,
            date: accepted.start_date,
        });

        info!(
            "Leave request from {} for {} to {}",
            form.employee_name, accepted.start_date, accepted.end_date
        );
        Ok(&self.requests[self.requests.len() - 1])
    }

    /// Move the request at `index` out of `Pending`.
    ///
    /// Terminal requests cannot change again and `Pending` is not a valid target.
    pub fn set_status(&mut self, index: usize, status: LeaveStatus) -> Result<&LeaveRequest> {
        let request = self
            .requests
            .get_mut(index)
            .ok_or_else(|| AppError::not_found(format!("leave request #{index}")))?;

        if request.status.is_terminal() {
            return Err(AppError::invalid_transition(format!(
                "request #{index} is already {}",
                request.status
            )));
        }
        if status == LeaveStatus::Pending {
            return Err(AppError::invalid_transition(format!(
                "request #{index} is already Pending"
            )));
        }

        request.status = status;
        info!("Leave request #{} for {} {}", index, request.employee_name, status);
        Ok(&*request)
    }

    pub fn approve(&mut self, index: usize) -> Result<&LeaveRequest> {
        self.set_status(index, LeaveStatus::Approved)
    }

    pub fn deny(&mut self, index: usize) -> Result<&LeaveRequest> {
        self.set_status(index, LeaveStatus::Denied)
    }

    /// Drop every request and the persisted copy. Asking for confirmation is up to the caller.
    pub fn clear_all<S: Store + ?Sized>(&mut self, store: &mut S) -> Result<usize> {
        store.remove(keys::LEAVE_REQUESTS)?;
        let cleared = self.requests.len();
        self.requests.clear();
        info!("Cleared {} leave requests", cleared);
        Ok(cleared)
    }

    pub fn requests(&self) -> &[LeaveRequest] {
        &self.requests
    }

    pub fn get(&self, index: usize) -> Option<&LeaveRequest> {
        self.requests.get(index)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn counts_by_status(&self) -> LeaveCounts {
        LeaveCounts::tally(self.requests.iter().map(|r| &r.status))
    }

    /// Roster entry whose name matches the request's employee name.
    pub fn enrich<'a>(&self, index: usize, employees: &'a EmployeeRepository) -> Option<&'a EmployeeRecord> {
        let request = self.requests.get(index)?;
        employees.find_by_name(&request.employee_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FaultyStore, MemoryStore};
    use chrono::NaiveDate;

    fn form(start: &str, end: &str) -> LeaveForm {
        LeaveForm {
            employee_name: "Noor Smith".into(),
            start_date: start.into(),
            end_date: end.into(),
            reason: "Year-end audit recovery".into(),
        }
    }

    fn with_statuses(statuses: &[LeaveStatus]) -> LeaveLedger {
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        LeaveLedger::new(
            statuses
                .iter()
                .map(|status| LeaveRequest {
                    employee_name: "X".into(),
                    start_date: day,
                    end_date: day,
                    reason: "r".into(),
                    status: *status,
                    date: day,
                })
                .collect(),
        )
    }

    #[test]
    fn test_submit_creates_pending_with_display_date() {
        let mut ledger = LeaveLedger::default();
        let request = ledger.submit(&form("2025-06-01", "2025-06-10")).unwrap();
        assert_eq!(request.status, LeaveStatus::Pending);
        assert_eq!(request.date, request.start_date);
        assert_eq!(request.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_single_day_leave_accepted() {
        let mut ledger = LeaveLedger::default();
        assert!(ledger.submit(&form("2025-06-01", "2025-06-01")).is_ok());
    }

    #[test]
    fn test_reversed_range_rejected_without_mutation() {
        let mut ledger = LeaveLedger::default();
        ledger.submit(&form("2025-05-01", "2025-05-02")).unwrap();
        let before = ledger.len();

        let err = ledger.submit(&form("2025-06-10", "2025-06-01")).unwrap_err();
        assert!(matches!(err, AppError::DateRange));
        assert_eq!(err.to_string(), "End date cannot be before start date.");
        assert_eq!(ledger.len(), before);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let mut ledger = LeaveLedger::default();
        let mut incomplete = form("2025-06-01", "2025-06-02");
        incomplete.reason = String::new();
        assert!(matches!(ledger.submit(&incomplete), Err(AppError::Validation(_))));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_counts_by_status() {
        let ledger = with_statuses(&[LeaveStatus::Pending, LeaveStatus::Approved, LeaveStatus::Approved]);
        assert_eq!(
            ledger.counts_by_status(),
            LeaveCounts {
                pending: 1,
                approved: 2,
                denied: 0
            }
        );
    }

    #[test]
    fn test_approve_and_deny_from_pending() {
        let mut ledger = with_statuses(&[LeaveStatus::Pending, LeaveStatus::Pending]);
        assert_eq!(ledger.approve(0).unwrap().status, LeaveStatus::Approved);
        assert_eq!(ledger.deny(1).unwrap().status, LeaveStatus::Denied);
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut ledger = with_statuses(&[LeaveStatus::Approved, LeaveStatus::Denied]);
        assert!(matches!(ledger.deny(0), Err(AppError::InvalidTransition(_))));
        assert!(matches!(ledger.approve(1), Err(AppError::InvalidTransition(_))));
        assert_eq!(ledger.get(0).unwrap().status, LeaveStatus::Approved);
        assert_eq!(ledger.get(1).unwrap().status, LeaveStatus::Denied);
    }

    #[test]
    fn test_pending_is_not_a_target() {
        let mut ledger = with_statuses(&[LeaveStatus::Pending]);
        assert!(matches!(
            ledger.set_status(0, LeaveStatus::Pending),
            Err(AppError::InvalidTransition(_))
        ));
    }

    #[test]
    fn test_out_of_range_index() {
        let mut ledger = with_statuses(&[LeaveStatus::Pending]);
        assert!(matches!(ledger.approve(3), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_clear_all_removes_persisted_copy() {
        let mut store = MemoryStore::new();
        let mut ledger = with_statuses(&[LeaveStatus::Pending, LeaveStatus::Denied]);
        ledger.save(&mut store).unwrap();

        assert_eq!(ledger.clear_all(&mut store).unwrap(), 2);
        assert!(ledger.is_empty());
        assert_eq!(store.get(keys::LEAVE_REQUESTS).unwrap(), None);
    }

    #[test]
    fn test_round_trip_preserves_order_and_values() {
        let mut store = MemoryStore::new();
        let mut ledger = LeaveLedger::default();
        ledger.submit(&form("2025-06-01", "2025-06-02")).unwrap();
        ledger.submit(&form("2025-07-01", "2025-07-05")).unwrap();
        ledger.approve(1).unwrap();
        ledger.save(&mut store).unwrap();

        let (reloaded, origin) = LeaveLedger::load(&store).unwrap();
        assert_eq!(origin, Origin::Persisted);
        assert_eq!(reloaded.requests(), ledger.requests());
    }

    #[test]
    fn test_malformed_or_missing_store_starts_empty() {
        let mut store = MemoryStore::new();
        let (ledger, origin) = LeaveLedger::load(&store).unwrap();
        assert_eq!(origin, Origin::Seeded);
        assert!(ledger.is_empty());

        store.set(keys::LEAVE_REQUESTS, "[{\"employeeName\":").unwrap();
        let (ledger, origin) = LeaveLedger::load(&store).unwrap();
        assert_eq!(origin, Origin::Seeded);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_failed_clear_keeps_requests() {
        let mut store = FaultyStore::default();
        let mut ledger = with_statuses(&[LeaveStatus::Pending, LeaveStatus::Denied]);
        ledger.save(&mut store).unwrap();
        store.fail_writes = true;

        assert!(ledger.clear_all(&mut store).is_err());
        assert_eq!(ledger.len(), 2);
        assert!(store.inner.get(keys::LEAVE_REQUESTS).unwrap().is_some());
    }

    #[test]
    fn test_enrich_matches_roster_by_name() {
        let (employees, _) = EmployeeRepository::load(&MemoryStore::new()).unwrap();
        let mut ledger = LeaveLedger::default();
        ledger.submit(&form("2025-06-01", "2025-06-02")).unwrap();
        let mut unknown = form("2025-06-01", "2025-06-02");
        unknown.employee_name = "Nobody".into();
        ledger.submit(&unknown).unwrap();

        assert_eq!(ledger.enrich(0, &employees).unwrap().department, "Finance");
        assert!(ledger.enrich(1, &employees).is_none());
        assert!(ledger.enrich(5, &employees).is_none());
    }
}
