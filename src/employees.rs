//! Employee repository: the roster with ID assignment and validated CRUD.

use tracing::{debug, info};

use crate::error::Result;
use crate::fixtures::RosterFixture;
use crate::models::{CategoryCounts, EmployeeDraft, EmployeeRecord};
use crate::store::{self, Origin, Store, keys};
use crate::validation::accept_employee;

/// Employee master data in insertion order.
#[derive(Debug, Clone, Default)]
pub struct EmployeeRepository {
    employees: Vec<EmployeeRecord>,
    /// Highest ID ever handed out or loaded.
    high_water: u32,
}

impl EmployeeRepository {
    pub fn new(employees: Vec<EmployeeRecord>) -> Self {
        let high_water = employees.iter().map(|e| e.employee_id).max().unwrap_or(0);
        Self { employees, high_water }
    }

    /// Load the persisted roster, or the bundled roster when nothing usable is stored.
    ///
    /// The persisted high-water mark is restored too, so IDs freed by deletion
    /// in an earlier session stay retired.
    pub fn load<S: Store + ?Sized>(store: &S) -> Result<(Self, Origin)> {
        let issued = store::load_json::<u32, _>(store, keys::EMPLOYEE_ID_HIGH_WATER)?.unwrap_or(0);

        let (mut repo, origin) = match store::load_json::<Vec<EmployeeRecord>, _>(store, keys::EMPLOYEES)? {
            Some(employees) => {
                debug!("Loaded {} employees from store", employees.len());
                (Self::new(employees), Origin::Persisted)
            }
            None => {
                let employees = RosterFixture::bundled().employees;
                debug!("Seeded {} employees from fixture", employees.len());
                (Self::new(employees), Origin::Seeded)
            }
        };
        repo.high_water = repo.high_water.max(issued);
        Ok((repo, origin))
    }

    /// Serialize the whole roster and the ID high-water mark.
    pub fn save<S: Store + ?Sized>(&self, store: &mut S) -> Result<()> {
        // Written before the roster so the stored mark is never behind it.
        store::save_json(store, keys::EMPLOYEE_ID_HIGH_WATER, &self.high_water)?;
        store::save_json(store, keys::EMPLOYEES, &self.employees)
    }

    /// ID the next added employee will receive.
    ///
    /// `max(existing IDs, 0) + 1`, never below an ID already issued, so
    /// deleting the newest employee does not recycle its ID.
    pub fn next_id(&self) -> u32 {
        let max_existing = self.employees.iter().map(|e| e.employee_id).max().unwrap_or(0);
        max_existing.max(self.high_water) + 1
    }

    /// Validate and append a new employee.
    pub fn add(&mut self, draft: &EmployeeDraft) -> Result<&EmployeeRecord> {
        let accepted = accept_employee(draft)?;
        let employee_id = self.next_id();

        self.employees.push(EmployeeRecord {
            employee_id,
            name: draft.name.clone(),
            position: draft.position.clone(),
            department: draft.department.clone(),
            employment_type: accepted.employment_type,
            salary: accepted.salary,
            contact: draft.contact.clone(),
            employment_history: None,
        });
        self.high_water = employee_id;

        info!("Added employee {} ({})", employee_id, draft.name);
        Ok(&self.employees[self.employees.len() - 1])
    }

    /// Validate and replace every field except the ID.
    ///
    /// Returns `Ok(None)` when no employee has this ID.
    pub fn update(&mut self, id: u32, draft: &EmployeeDraft) -> Result<Option<&EmployeeRecord>> {
        let accepted = accept_employee(draft)?;

        let Some(record) = self.employees.iter_mut().find(|e| e.employee_id == id) else {
            return Ok(None);
        };

        record.name = draft.name.clone();
        record.position = draft.position.clone();
        record.department = draft.department.clone();
        record.employment_type = accepted.employment_type;
        record.salary = accepted.salary;
        record.contact = draft.contact.clone();

        info!("Updated employee {}", id);
        Ok(Some(&*record))
    }

    /// Drop the employee with this ID. Attendance and leave records are left alone.
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.employees.len();
        self.employees.retain(|e| e.employee_id != id);
        let removed = self.employees.len() < before;
        if removed {
            info!("Removed employee {}", id);
        }
        removed
    }

    pub fn list(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&EmployeeRecord> {
        self.employees.iter().find(|e| e.employee_id == id)
    }

    /// First employee whose name matches exactly.
    pub fn find_by_name(&self, name: &str) -> Option<&EmployeeRecord> {
        self.employees.iter().find(|e| e.name == name)
    }

    pub fn category_counts(&self) -> CategoryCounts {
        CategoryCounts::tally(self.employees.iter().map(|e| &e.employment_type))
    }

    pub fn total_salaries(&self) -> f64 {
        self.employees.iter().map(|e| e.salary).sum()
    }
}
