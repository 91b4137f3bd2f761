//! Core data model: courses, semesters, and the cumulative record.
//!
//! Derived fields (`gpa`, `total_credits`, `cgpa`) are only ever written by
//! the functions in [`crate::engine`].

use serde::{Deserialize, Serialize};

use crate::grade::Grade;

/// A single graded course inside a semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Identifier, unique within the owning semester.
    pub id: String,
    /// Course name as entered by the student.
    pub name: String,
    /// Credit weight; fractional values such as 1.5 are allowed.
    pub credit_hours: f64,
    /// Letter grade received.
    pub grade: Grade,
}

impl Course {
    /// Grade points times credit hours.
    pub fn quality_points(&self) -> f64 {
        self.grade.point() * self.credit_hours
    }
}

/// Course input before an identifier has been assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub name: String,
    pub credit_hours: f64,
    pub grade: Grade,
}

impl NewCourse {
    pub fn new(name: impl Into<String>, credit_hours: f64, grade: Grade) -> Self {
        Self {
            name: name.into(),
            credit_hours,
            grade,
        }
    }

    /// Attach an identifier, producing a stored course.
    pub fn with_id(self, id: impl Into<String>) -> Course {
        Course {
            id: id.into(),
            name: self.name,
            credit_hours: self.credit_hours,
            grade: self.grade,
        }
    }
}

/// A partial edit of an existing course. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub credit_hours: Option<f64>,
    #[serde(default)]
    pub grade: Option<Grade>,
}

impl CourseUpdate {
    /// Returns `true` if applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.credit_hours.is_none() && self.grade.is_none()
    }

    /// Produce a copy of `course` with this update merged in.
    pub fn apply_to(&self, course: &Course) -> Course {
        Course {
            id: course.id.clone(),
            name: self.name.clone().unwrap_or_else(|| course.name.clone()),
            credit_hours: self.credit_hours.unwrap_or(course.credit_hours),
            grade: self.grade.unwrap_or(course.grade),
        }
    }
}

/// One academic term and the courses taken in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    /// Globally unique identifier.
    pub id: String,
    /// Display name, e.g. "Fall 2024".
    pub name: String,
    /// Courses in insertion order.
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Derived semester GPA.
    #[serde(default)]
    pub gpa: f64,
    /// Derived GPA-bearing credit hours (F courses excluded).
    #[serde(default)]
    pub total_credits: f64,
}

impl Semester {
    /// An empty semester with zeroed derived fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            courses: Vec::new(),
            gpa: 0.0,
            total_credits: 0.0,
        }
    }

    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }
}

/// The root aggregate: every semester plus cumulative statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRecord {
    /// Semesters in insertion order.
    #[serde(default)]
    pub semesters: Vec<Semester>,
    /// Derived cumulative GPA.
    #[serde(default)]
    pub cgpa: f64,
    /// Derived cumulative GPA-bearing credit hours.
    #[serde(default)]
    pub total_credits: f64,
}

impl AggregateRecord {
    /// Total number of courses across all semesters.
    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|s| s.courses.len()).sum()
    }
}
