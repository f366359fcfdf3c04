//! Field-level validation for user-entered employees, leave requests and reviews.
//!
//! Validators are pure: they never touch a ledger. An empty [`FieldErrors`]
//! means the candidate may be persisted.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{EmployeeDraft, EmploymentType, LeaveForm, ReviewForm};

pub const EMPTY: &str = "Cannot be empty";
pub const SALARY_NOT_NUMBER: &str = "Salary must be a number";
pub const SALARY_NEGATIVE: &str = "Salary cannot be negative";
pub const INVALID_PHONE: &str = "Invalid phone number";
pub const INVALID_EMPLOYMENT_TYPE: &str = "Must be Full-Time, Part-Time, or Contractor";
pub const INVALID_DATE: &str = "Invalid date";

const PHONE_MIN_LEN: usize = 9;
const PHONE_MAX_LEN: usize = 15;

/// Field name to message. One message per field; later checks overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(())` when nothing was flagged.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Typed values extracted from an accepted employee draft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedEmployee {
    pub salary: f64,
    pub employment_type: EmploymentType,
}

/// Typed values extracted from an accepted leave form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedLeave {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Digits, `-` and `+` only, 9 to 15 characters.
pub fn is_valid_phone(contact: &str) -> bool {
    let len = contact.chars().count();
    (PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&len)
        && contact.chars().all(|c| c.is_ascii_digit() || c == '-' || c == '+')
}

/// Parse user-typed dates, accepting `-`, `/` or `.` as separators.
pub fn parse_form_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for fmt in &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Some(date);
        }
    }
    None
}

/// Validate a candidate employee and return every problem found.
pub fn validate_employee(draft: &EmployeeDraft) -> FieldErrors {
    accept_employee(draft).err().unwrap_or_default()
}

/// Validate a candidate employee, returning the coerced salary and type on success.
pub fn accept_employee(draft: &EmployeeDraft) -> Result<AcceptedEmployee, FieldErrors> {
    let mut errors = FieldErrors::new();

    let fields = [
        ("name", draft.name.as_str()),
        ("position", draft.position.as_str()),
        ("department", draft.department.as_str()),
        ("salary", draft.salary.as_str()),
        ("contact", draft.contact.as_str()),
        ("employmentType", draft.employment_type.as_str()),
    ];
    for (field, value) in fields {
        if is_blank(value) {
            errors.insert(field, EMPTY);
        }
    }

    let mut salary = None;
    if !is_blank(&draft.salary) {
        match draft.salary.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => salary = Some(value),
            Ok(value) if value.is_finite() => errors.insert("salary", SALARY_NEGATIVE),
            _ => errors.insert("salary", SALARY_NOT_NUMBER),
        }
    }

    if !is_blank(&draft.contact) && !is_valid_phone(&draft.contact) {
        errors.insert("contact", INVALID_PHONE);
    }

    let mut employment_type = None;
    if !is_blank(&draft.employment_type) {
        match draft.employment_type.parse::<EmploymentType>() {
            Ok(kind) => employment_type = Some(kind),
            Err(()) => errors.insert("employmentType", INVALID_EMPLOYMENT_TYPE),
        }
    }

    match (salary, employment_type) {
        (Some(salary), Some(employment_type)) if errors.is_empty() => Ok(AcceptedEmployee {
            salary,
            employment_type,
        }),
        _ => Err(errors),
    }
}

/// Validate a leave form. Does not compare start and end; that is a separate rejection.
pub fn validate_leave(form: &LeaveForm) -> FieldErrors {
    accept_leave(form).err().unwrap_or_default()
}

pub fn accept_leave(form: &LeaveForm) -> Result<AcceptedLeave, FieldErrors> {
    let mut errors = FieldErrors::new();

    if is_blank(&form.employee_name) {
        errors.insert("employeeName", EMPTY);
    }
    if is_blank(&form.reason) {
        errors.insert("reason", EMPTY);
    }

    let mut date = |field: &'static str, value: &str| {
        if is_blank(value) {
            errors.insert(field, EMPTY);
            return None;
        }
        let parsed = parse_form_date(value);
        if parsed.is_none() {
            errors.insert(field, INVALID_DATE);
        }
        parsed
    };
    let start_date = date("startDate", &form.start_date);
    let end_date = date("endDate", &form.end_date);

    match (start_date, end_date) {
        (Some(start_date), Some(end_date)) if errors.is_empty() => Ok(AcceptedLeave { start_date, end_date }),
        _ => Err(errors),
    }
}

/// Every review field is required.
pub fn validate_review(form: &ReviewForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (field, value) in form.fields() {
        if is_blank(value) {
            errors.insert(field, format!("Please fill the {field} field."));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> EmployeeDraft {
        EmployeeDraft {
            name: "A".into(),
            position: "B".into(),
            department: "C".into(),
            salary: "1000".into(),
            contact: "0821234567".into(),
            employment_type: "Full-Time".into(),
        }
    }

    #[test]
    fn test_minimal_record_accepted() {
        assert!(validate_employee(&minimal()).is_empty());
        let accepted = accept_employee(&minimal()).unwrap();
        assert_eq!(accepted.salary, 1000.0);
        assert_eq!(accepted.employment_type, EmploymentType::FullTime);
    }

    #[test]
    fn test_every_empty_field_flagged() {
        let errors = validate_employee(&EmployeeDraft::default());
        assert_eq!(errors.len(), 6);
        for field in ["name", "position", "department", "salary", "contact", "employmentType"] {
            assert_eq!(errors.get(field), Some(EMPTY), "field {field}");
        }
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let mut draft = minimal();
        draft.position = "   ".into();
        draft.contact = "\t".into();
        let errors = validate_employee(&draft);
        assert_eq!(errors.get("position"), Some(EMPTY));
        assert_eq!(errors.get("contact"), Some(EMPTY));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_salary_rules() {
        let mut draft = minimal();
        draft.salary = "12k".into();
        assert_eq!(validate_employee(&draft).get("salary"), Some(SALARY_NOT_NUMBER));

        draft.salary = "NaN".into();
        assert_eq!(validate_employee(&draft).get("salary"), Some(SALARY_NOT_NUMBER));

        draft.salary = "-5".into();
        assert_eq!(validate_employee(&draft).get("salary"), Some(SALARY_NEGATIVE));

        draft.salary = " 2500.75 ".into();
        assert_eq!(accept_employee(&draft).unwrap().salary, 2500.75);
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone("0821234567"));
        assert!(is_valid_phone("+27-82-123-4567"));
        assert!(!is_valid_phone("12345678"));
        assert!(!is_valid_phone("1234567890123456"));
        assert!(!is_valid_phone("082 123 4567"));
        assert!(!is_valid_phone("me@example.com"));

        let mut draft = minimal();
        draft.contact = "call me".into();
        assert_eq!(validate_employee(&draft).get("contact"), Some(INVALID_PHONE));
    }

    #[test]
    fn test_employment_type_must_be_known() {
        let mut draft = minimal();
        draft.employment_type = "Intern".into();
        let errors = validate_employee(&draft);
        assert_eq!(errors.get("employmentType"), Some(INVALID_EMPLOYMENT_TYPE));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_display_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("salary", SALARY_NOT_NUMBER);
        errors.insert("name", EMPTY);
        assert_eq!(errors.to_string(), "name: Cannot be empty; salary: Salary must be a number");
    }

    #[test]
    fn test_leave_form() {
        let form = LeaveForm {
            employee_name: "Thabo Nkosi".into(),
            start_date: "2025-06-01".into(),
            end_date: "2025/06/03".into(),
            reason: "Family".into(),
        };
        let accepted = accept_leave(&form).unwrap();
        assert_eq!(accepted.start_date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(accepted.end_date, NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());

        let errors = validate_leave(&LeaveForm {
            start_date: "June 1st".into(),
            ..Default::default()
        });
        assert_eq!(errors.get("employeeName"), Some(EMPTY));
        assert_eq!(errors.get("startDate"), Some(INVALID_DATE));
        assert_eq!(errors.get("endDate"), Some(EMPTY));
        assert_eq!(errors.get("reason"), Some(EMPTY));
    }

    #[test]
    fn test_review_form_requires_everything() {
        let mut form = ReviewForm {
            name: "Zainul Moses".into(),
            role: "Marketing Specialist".into(),
            department: "Marketing".into(),
            performance_rating: "Excellent".into(),
            attendance: "96%".into(),
            peer_feedback: "Positive".into(),
            review_date: "2025-06-08".into(),
            reviewer: "Zara Mahomed".into(),
        };
        assert!(validate_review(&form).is_empty());

        form.peer_feedback = " ".into();
        let errors = validate_review(&form);
        assert_eq!(errors.get("peerFeedback"), Some("Please fill the peerFeedback field."));
    }
}
