//! Attendance statuses and per-employee attendance logs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Status recorded for one employee on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [Self::Present, Self::Absent, Self::Late, Self::OnLeave];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Late => "Late",
            Self::OnLeave => "On Leave",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|status| status.as_str() == s).ok_or(())
    }
}

/// Attendance log of a single employee.
///
/// Dates are calendar days serialized as ISO 8601 (`YYYY-MM-DD`) keys, so the
/// map order is both chronological and lexicographic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: u32,
    pub name: String,
    pub department: String,
    pub attendance: BTreeMap<NaiveDate, AttendanceStatus>,
}

/// Per-status day counts for one employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub on_leave: usize,
}

impl StatusSummary {
    /// Count one more day with the given status.
    pub fn record(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Late => self.late += 1,
            AttendanceStatus::OnLeave => self.on_leave += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.present + self.absent + self.late + self.on_leave
    }
}
