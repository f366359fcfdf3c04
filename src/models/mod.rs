//! Data models for employees, attendance, leave requests and reviews.

pub mod attendance;
pub mod employee;
pub mod leave;
pub mod review;

pub use attendance::{AttendanceRecord, AttendanceStatus, StatusSummary};
pub use employee::{CategoryCounts, EmployeeDraft, EmployeeRecord, EmploymentType};
pub use leave::{LeaveCounts, LeaveForm, LeaveRequest, LeaveStatus};
pub use review::{PerformanceReview, ReviewForm};
