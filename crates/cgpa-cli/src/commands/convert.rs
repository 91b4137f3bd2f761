//! The `cgpa convert` and `cgpa step` commands.

use anyhow::Result;

use cgpa_core::grade::{grade_for_point, point_for_grade, Grade};
use cgpa_core::stepper::{next_gpa_step, StepDirection};

use super::fmt_gpa;

pub fn execute(grade: Option<Grade>, point: Option<f64>) -> Result<()> {
    if let Some(grade) = grade {
        println!("{grade} = {}", fmt_gpa(point_for_grade(grade)));
    }
    if let Some(point) = point {
        anyhow::ensure!(!point.is_nan(), "point must be a number");
        let clamped = point.clamp(0.0, 4.0);
        println!("{} = {}", fmt_gpa(clamped), grade_for_point(clamped));
    }
    Ok(())
}

pub fn step(gpa: f64, direction: StepDirection) -> Result<()> {
    anyhow::ensure!(gpa.is_finite(), "gpa must be a finite number");
    println!("{}", fmt_gpa(next_gpa_step(gpa, direction)));
    Ok(())
}
