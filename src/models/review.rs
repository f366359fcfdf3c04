//! Performance review DTOs.

use serde::{Deserialize, Serialize};

/// A recorded performance review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReview {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub department: String,
    pub performance_rating: String,
    pub attendance: String,
    pub peer_feedback: String,
    pub review_date: String,
    pub reviewer: String,
}

/// DTO for adding a review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewForm {
    pub name: String,
    pub role: String,
    pub department: String,
    pub performance_rating: String,
    pub attendance: String,
    pub peer_feedback: String,
    pub review_date: String,
    pub reviewer: String,
}

impl ReviewForm {
    /// Field names paired with their values, in form order.
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("name", self.name.as_str()),
            ("role", self.role.as_str()),
            ("department", self.department.as_str()),
            ("performanceRating", self.performance_rating.as_str()),
            ("attendance", self.attendance.as_str()),
            ("peerFeedback", self.peer_feedback.as_str()),
            ("reviewDate", self.review_date.as_str()),
            ("reviewer", self.reviewer.as_str()),
        ]
    }

    pub fn into_review(self, id: u32) -> PerformanceReview {
        PerformanceReview {
            id,
            name: self.name,
            role: self.role,
            department: self.department,
            performance_rating: self.performance_rating,
            attendance: self.attendance,
            peer_feedback: self.peer_feedback,
            review_date: self.review_date,
            reviewer: self.reviewer,
        }
    }
}
