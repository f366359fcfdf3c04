//! Bundled seed datasets, used only when no persisted state exists.

use serde::Deserialize;
use tracing::error;

use crate::error::Result;
use crate::models::{EmployeeRecord, PerformanceReview};

const ATTENDANCE_JSON: &str = include_str!("../fixtures/attendance.json");
const EMPLOYEE_INFO_JSON: &str = include_str!("../fixtures/employee_info.json");
const REVIEWS_JSON: &str = include_str!("../fixtures/reviews.json");

/// Attendance fixture: per-employee day logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceFixture {
    #[serde(rename = "attendanceAndLeave")]
    pub entries: Vec<FixtureEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureEntry {
    pub employee_id: u32,
    pub name: String,
    #[serde(default)]
    pub attendance: Vec<FixtureDay>,
}

/// Kept as raw text so one bad entry can be skipped instead of rejecting the file.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureDay {
    pub date: String,
    pub status: String,
}

/// Employee roster fixture.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterFixture {
    #[serde(rename = "employeeInformation")]
    pub employees: Vec<EmployeeRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewFixture {
    pub reviews: Vec<PerformanceReview>,
}

impl AttendanceFixture {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn bundled() -> Self {
        Self::from_json(ATTENDANCE_JSON).unwrap_or_else(|e| {
            error!("Bundled attendance fixture is unreadable: {e}");
            Self::default()
        })
    }
}

impl RosterFixture {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn bundled() -> Self {
        Self::from_json(EMPLOYEE_INFO_JSON).unwrap_or_else(|e| {
            error!("Bundled roster fixture is unreadable: {e}");
            Self::default()
        })
    }
}

impl ReviewFixture {
    pub fn bundled() -> Self {
        serde_json::from_str(REVIEWS_JSON).unwrap_or_else(|e| {
            error!("Bundled review fixture is unreadable: {e}");
            Self::default()
        })
    }
}
