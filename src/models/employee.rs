//! Employee records and the raw form used to create or edit them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Contract type of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    PartTime,
    #[serde(rename = "Contractor")]
    Contractor,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 3] = [Self::FullTime, Self::PartTime, Self::Contractor];

    /// Display label, identical to the persisted form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "Full-Time",
            Self::PartTime => "Part-Time",
            Self::Contractor => "Contractor",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
    }
}

/// A validated employee in the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub employee_id: u32,
    pub name: String,
    pub position: String,
    pub department: String,
    pub employment_type: EmploymentType,
    pub salary: f64,
    pub contact: String,
    /// Free text carried over from the seed roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_history: Option<String>,
}

/// Unvalidated employee fields as typed by a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub name: String,
    pub position: String,
    pub department: String,
    pub salary: String,
    pub contact: String,
    pub employment_type: String,
}

impl EmployeeDraft {
    /// Prefill a draft from an existing record (edit form).
    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self {
            name: record.name.clone(),
            position: record.position.clone(),
            department: record.department.clone(),
            salary: record.salary.to_string(),
            contact: record.contact.clone(),
            employment_type: record.employment_type.as_str().to_string(),
        }
    }
}

/// Headcount per employment type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    pub full_time: usize,
    pub part_time: usize,
    pub contractors: usize,
}

impl CategoryCounts {
    pub fn tally<'a>(kinds: impl IntoIterator<Item = &'a EmploymentType>) -> Self {
        let mut counts = Self::default();
        for kind in kinds {
            match kind {
                EmploymentType::FullTime => counts.full_time += 1,
                EmploymentType::PartTime => counts.part_time += 1,
                EmploymentType::Contractor => counts.contractors += 1,
            }
        }
        counts
    }
}
