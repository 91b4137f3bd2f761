//! Input validation for course and semester edits.
//!
//! The engine assumes well-formed input; the gradebook runs these checks
//! before any course reaches it.

use serde::{Deserialize, Serialize};

use crate::error::GradebookError;
use crate::model::Course;

/// Accepted range of credit hours for a single course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditPolicy {
    pub min: f64,
    pub max: f64,
}

impl Default for CreditPolicy {
    fn default() -> Self {
        Self { min: 1.0, max: 6.0 }
    }
}

impl CreditPolicy {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check a credit-hour value against this policy.
    pub fn validate(&self, credit_hours: f64) -> Result<(), GradebookError> {
        validate_credit_hours(credit_hours, self)
    }
}

/// A course name must contain something other than whitespace.
pub fn validate_course_name(name: &str) -> Result<(), GradebookError> {
    if name.trim().is_empty() {
        return Err(GradebookError::InvalidCourse(
            "course name must not be blank".into(),
        ));
    }
    Ok(())
}

/// Credit hours must be finite, positive, and inside the policy range.
pub fn validate_credit_hours(
    credit_hours: f64,
    policy: &CreditPolicy,
) -> Result<(), GradebookError> {
    if !credit_hours.is_finite() || credit_hours <= 0.0 {
        return Err(GradebookError::InvalidCourse(format!(
            "credit hours must be a positive number, got {credit_hours}"
        )));
    }
    if credit_hours < policy.min || credit_hours > policy.max {
        return Err(GradebookError::InvalidCourse(format!(
            "credit hours must be between {} and {}, got {credit_hours}",
            policy.min, policy.max
        )));
    }
    Ok(())
}

/// Validate every user-editable field of a course.
pub fn validate_course(course: &Course, policy: &CreditPolicy) -> Result<(), GradebookError> {
    validate_course_name(&course.name)?;
    validate_credit_hours(course.credit_hours, policy)
}

/// A semester name must contain something other than whitespace.
pub fn validate_semester_name(name: &str) -> Result<(), GradebookError> {
    if name.trim().is_empty() {
        return Err(GradebookError::InvalidSemester(
            "semester name must not be blank".into(),
        ));
    }
    Ok(())
}
