//! Built-in course catalog.
//!
//! Lets a student pick a known course by code and have its name and credit
//! hours filled in.

use serde::Serialize;

use crate::error::GradebookError;
use crate::grade::Grade;
use crate::model::NewCourse;

/// A known course offering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub credit_hours: f64,
}

impl CatalogEntry {
    const fn new(name: &'static str, code: &'static str, credit_hours: f64) -> Self {
        Self {
            code,
            name,
            credit_hours,
        }
    }

    /// Course input for this entry with the given grade.
    pub fn to_new_course(&self, grade: Grade) -> NewCourse {
        NewCourse::new(self.name, self.credit_hours, grade)
    }
}

static CATALOG: &[CatalogEntry] = &[
    CatalogEntry::new("Competitive Programming", "CS200", 3.0),
    CatalogEntry::new("Algorithm Design and Analysis", "CS231", 3.0),
    CatalogEntry::new("Algorithms", "CS301", 4.0),
    CatalogEntry::new("Database Systems", "CS305", 3.0),
    CatalogEntry::new("Web Development", "CS325", 3.0),
    CatalogEntry::new("Mobile App Development", "CS330", 3.0),
    CatalogEntry::new("Calculus I", "MATH101", 4.0),
    CatalogEntry::new("Linear Algebra", "MATH201", 3.0),
    CatalogEntry::new("Statistics", "MATH240", 3.0),
    CatalogEntry::new("Discrete Mathematics", "MATH220", 4.0),
    CatalogEntry::new("Physics I", "PHYS101", 4.0),
    CatalogEntry::new("Physics II", "PHYS102", 4.0),
    CatalogEntry::new("English Composition", "ENG101", 3.0),
    CatalogEntry::new("Technical Writing", "ENG205", 3.0),
    CatalogEntry::new("Artificial Intelligence", "CS410", 4.0),
    CatalogEntry::new("Machine Learning", "CS420", 4.0),
    CatalogEntry::new("Computer Networks", "CS340", 3.0),
    CatalogEntry::new("Operating Systems", "CS350", 4.0),
    CatalogEntry::new("Software Engineering", "CS360", 3.0),
    CatalogEntry::new("Computer Graphics", "CS370", 4.0),
    CatalogEntry::new("Cybersecurity", "CS380", 3.0),
    CatalogEntry::new("Cloud Computing", "CS430", 3.0),
    CatalogEntry::new("Introduction to Psychology", "PSY101", 3.0),
    CatalogEntry::new("Introduction to Sociology", "SOC101", 3.0),
    CatalogEntry::new("Business Management", "BUS101", 3.0),
    CatalogEntry::new("Microeconomics", "ECON101", 3.0),
    CatalogEntry::new("Macroeconomics", "ECON102", 3.0),
    CatalogEntry::new("Introduction to Marketing", "MKT101", 3.0),
    CatalogEntry::new("Ethics in Technology", "PHIL230", 3.0),
    CatalogEntry::new("Professional Development", "PROF100", 1.0),
];

/// Every catalog entry, in catalog order.
pub fn entries() -> &'static [CatalogEntry] {
    CATALOG
}

/// Find an entry by course code, ignoring case.
pub fn lookup(code: &str) -> Result<&'static CatalogEntry, GradebookError> {
    let code = code.trim();
    CATALOG
        .iter()
        .find(|e| e.code.eq_ignore_ascii_case(code))
        .ok_or_else(|| GradebookError::UnknownCatalogCode(code.to_string()))
}

/// Entries whose code or name contains `query`, ignoring case.
pub fn search(query: &str) -> Vec<&'static CatalogEntry> {
    let query = query.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|e| {
            e.code.to_lowercase().contains(&query) || e.name.to_lowercase().contains(&query)
        })
        .collect()
}
