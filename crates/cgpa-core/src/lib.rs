//! cgpa-core — Grade-point aggregation engine and gradebook model.
//!
//! The `grade`, `engine` and `stepper` modules are pure computation with no
//! I/O. Everything else (the gradebook state store, storage, configuration)
//! is the collaborator layer that calls into the engine after every mutation.

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod grade;
pub mod gradebook;
pub mod model;
pub mod stepper;
pub mod storage;
pub mod validation;

pub use engine::{
    cumulative_credits, cumulative_gpa, recompute_aggregate, recompute_semester,
    semester_credits, semester_gpa,
};
pub use error::GradebookError;
pub use grade::{grade_for_point, point_for_grade, Grade};
pub use gradebook::Gradebook;
pub use model::{AggregateRecord, Course, CourseUpdate, NewCourse, Semester};
pub use stepper::{next_gpa_step, StepDirection};
