//! Attendance ledger: per-employee day logs over a shared date range.
//!
//! Only ISO 8601 calendar dates (`YYYY-MM-DD`) are accepted. They are held as
//! [`NaiveDate`], whose ordering matches the lexicographic ordering of the ISO
//! strings they are persisted as.

use chrono::NaiveDate;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::fixtures::AttendanceFixture;
use crate::models::{AttendanceRecord, AttendanceStatus, StatusSummary};
use crate::store::{self, Origin, Store, keys};

/// Department selector value meaning "no department filter".
pub const ALL_DEPARTMENTS: &str = "All";
/// Department for employees missing from the lookup table.
pub const DEFAULT_DEPARTMENT: &str = "General";
/// Shown for a date an employee has no entry for.
pub const MISSING_DAY: &str = "—";

const ISO_DATE: &str = "%Y-%m-%d";

/// Static employee ID to department lookup used for display.
pub fn department_for(employee_id: u32) -> &'static str {
    match employee_id {
        1 | 5 | 8 | 10 => "HR",
        2 | 3 | 7 => "Engineering",
        4 => "Sales",
        6 => "Finance",
        9 => "Marketing",
        _ => DEFAULT_DEPARTMENT,
    }
}

/// Department selector for [`AttendanceLedger::filter`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DepartmentFilter {
    #[default]
    All,
    Only(String),
}

impl DepartmentFilter {
    /// Parse a selector value; [`ALL_DEPARTMENTS`] means every department.
    pub fn from_selector(selector: &str) -> Self {
        if selector == ALL_DEPARTMENTS {
            Self::All
        } else {
            Self::Only(selector.to_string())
        }
    }

    pub fn matches(&self, department: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == department,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttendanceLedger {
    records: Vec<AttendanceRecord>,
    /// Sorted union of every employee's dates.
    dates: Vec<NaiveDate>,
}

impl AttendanceLedger {
    pub fn new(records: Vec<AttendanceRecord>) -> Self {
        let dates = collect_dates(&records);
        Self { records, dates }
    }

    /// Build the ledger from the nested fixture structure.
    ///
    /// Entries whose date is not ISO 8601 or whose status is unknown are skipped.
    pub fn from_fixture(fixture: &AttendanceFixture) -> Self {
        let records = fixture
            .entries
            .iter()
            .map(|entry| {
                let mut attendance = BTreeMap::new();
                for day in &entry.attendance {
                    let Ok(date) = NaiveDate::parse_from_str(&day.date, ISO_DATE) else {
                        warn!("Skipping non-ISO date {:?} for employee {}", day.date, entry.employee_id);
                        continue;
                    };
                    let Ok(status) = day.status.parse::<AttendanceStatus>() else {
                        warn!("Skipping unknown status {:?} for employee {}", day.status, entry.employee_id);
                        continue;
                    };
                    attendance.insert(date, status);
                }

                AttendanceRecord {
                    id: entry.employee_id,
                    name: entry.name.clone(),
                    department: department_for(entry.employee_id).to_string(),
                    attendance,
                }
            })
            .collect();

        Self::new(records)
    }

    /// Load persisted attendance, or build it from the bundled fixture.
    pub fn load<S: Store + ?Sized>(store: &S) -> Result<(Self, Origin)> {
        let loaded = match store::load_json::<Vec<AttendanceRecord>, _>(store, keys::ATTENDANCE)? {
            Some(records) => {
                debug!("Loaded attendance for {} employees from store", records.len());
                (Self::new(records), Origin::Persisted)
            }
            None => {
                let ledger = Self::from_fixture(&AttendanceFixture::bundled());
                debug!("Seeded attendance for {} employees from fixture", ledger.records.len());
                (ledger, Origin::Seeded)
            }
        };
        Ok(loaded)
    }

    pub fn save<S: Store + ?Sized>(&self, store: &mut S) -> Result<()> {
        store::save_json(store, keys::ATTENDANCE, &self.records)
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn get(&self, employee_id: u32) -> Option<&AttendanceRecord> {
        self.records.iter().find(|r| r.id == employee_id)
    }

    /// Every date seen across all employees, oldest first.
    pub fn date_range(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Selector values: [`ALL_DEPARTMENTS`] followed by each department once, in first-seen order.
    pub fn departments(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut departments = vec![ALL_DEPARTMENTS];
        for record in &self.records {
            if seen.insert(record.department.as_str()) {
                departments.push(record.department.as_str());
            }
        }
        departments
    }

    /// Employees whose name contains `name_query` (case-insensitive) within the selected department.
    pub fn filter(&self, name_query: &str, department: &DepartmentFilter) -> Vec<&AttendanceRecord> {
        let query = name_query.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&query) && department.matches(&r.department))
            .collect()
    }

    /// Count each status across one employee's log.
    pub fn summarize(record: &AttendanceRecord) -> StatusSummary {
        let mut summary = StatusSummary::default();
        for status in record.attendance.values() {
            summary.record(*status);
        }
        summary
    }

    /// Status text for a grid cell, [`MISSING_DAY`] when the employee has no entry.
    pub fn status_label(record: &AttendanceRecord, date: NaiveDate) -> &'static str {
        record
            .attendance
            .get(&date)
            .map(AttendanceStatus::as_str)
            .unwrap_or(MISSING_DAY)
    }

    /// Present days summed over all employees.
    pub fn total_present_days(&self) -> usize {
        self.records
            .iter()
            .map(|r| {
                r.attendance
                    .values()
                    .filter(|s| **s == AttendanceStatus::Present)
                    .count()
            })
            .sum()
    }

    /// Recorded days of any status summed over all employees.
    pub fn total_days(&self) -> usize {
        self.records.iter().map(|r| r.attendance.len()).sum()
    }

    /// Demo data generator. Overwrites every employee's log with a uniformly
    /// random status for each date in the current range.
    ///
    /// Destroys real attendance data. Returns the number of assignments made.
    pub fn simulate_demo_data<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut assigned = 0;
        for record in &mut self.records {
            record.attendance = self
                .dates
                .iter()
                .map(|date| {
                    let status = AttendanceStatus::ALL[rng.gen_range(0..AttendanceStatus::ALL.len())];
                    (*date, status)
                })
                .collect();
            assigned += record.attendance.len();
        }

        info!(
            "Simulated attendance: {} employees x {} dates",
            self.records.len(),
            self.dates.len()
        );
        assigned
    }
}

fn collect_dates(records: &[AttendanceRecord]) -> Vec<NaiveDate> {
    let dates: BTreeSet<NaiveDate> = records
        .iter()
        .flat_map(|r| r.attendance.keys().copied())
        .collect();
    dates.into_iter().collect()
}
