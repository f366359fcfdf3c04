//! Leave requests and their status lifecycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle: `Pending -> Approved` or `Pending -> Denied`, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Denied => "Denied",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw leave form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveForm {
    pub employee_name: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

/// A stored leave request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub employee_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    /// Display date, copied from `start_date` on submission.
    pub date: NaiveDate,
}

/// Leave requests per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveCounts {
    pub approved: usize,
    pub denied: usize,
    pub pending: usize,
}

impl LeaveCounts {
    /// Tally statuses in one pass.
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a LeaveStatus>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            match status {
                LeaveStatus::Approved => counts.approved += 1,
                LeaveStatus::Denied => counts.denied += 1,
                LeaveStatus::Pending => counts.pending += 1,
            }
        }
        counts
    }
}
