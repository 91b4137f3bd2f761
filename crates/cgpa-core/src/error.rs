//! Gradebook error types.
//!
//! The aggregation engine itself never fails; these errors come from the
//! state store when a caller references a missing record or submits input
//! that fails form-level validation.

use thiserror::Error;

/// Errors raised by gradebook mutations and input parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradebookError {
    /// No semester with this identifier exists.
    #[error("semester not found: {0}")]
    SemesterNotFound(String),

    /// The semester exists but holds no course with this identifier.
    #[error("course {course_id} not found in semester {semester_id}")]
    CourseNotFound {
        semester_id: String,
        course_id: String,
    },

    /// Course input was rejected by validation.
    #[error("invalid course: {0}")]
    InvalidCourse(String),

    /// Semester input was rejected by validation.
    #[error("invalid semester: {0}")]
    InvalidSemester(String),

    /// A grade token outside the scale.
    #[error("unknown grade: {0:?}")]
    UnknownGrade(String),

    /// No catalog entry with this course code.
    #[error("unknown catalog code: {0}")]
    UnknownCatalogCode(String),
}

impl GradebookError {
    /// Returns `true` if the error refers to a record that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GradebookError::SemesterNotFound(_)
                | GradebookError::CourseNotFound { .. }
                | GradebookError::UnknownCatalogCode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_classification() {
        assert!(GradebookError::SemesterNotFound("s1".into()).is_not_found());
        assert!(GradebookError::CourseNotFound {
            semester_id: "s1".into(),
            course_id: "c1".into(),
        }
        .is_not_found());
        assert!(!GradebookError::InvalidCourse("blank name".into()).is_not_found());
    }

    #[test]
    fn messages_name_the_record() {
        let err = GradebookError::CourseNotFound {
            semester_id: "fall".into(),
            course_id: "cs101".into(),
        };
        assert_eq!(err.to_string(), "course cs101 not found in semester fall");
    }
}
