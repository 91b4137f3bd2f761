//! Discrete GPA stepper for increment/decrement controls.
//!
//! Moves a displayed GPA along a fixed, non-uniform table of steps instead
//! of by a constant increment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The ascending step table. Bounds are 0.0 and 4.0.
pub const GPA_STEPS: [f64; 10] = [0.0, 2.0, 2.25, 2.5, 2.75, 3.0, 3.25, 3.5, 3.75, 4.0];

/// Which way to move along the step table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    Up,
    Down,
}

impl fmt::Display for StepDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepDirection::Up => write!(f, "up"),
            StepDirection::Down => write!(f, "down"),
        }
    }
}

impl FromStr for StepDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" | "+" | "inc" => Ok(StepDirection::Up),
            "down" | "-" | "dec" => Ok(StepDirection::Down),
            other => Err(format!("unknown step direction: {other}")),
        }
    }
}

/// Index of the largest step not greater than `current`.
///
/// Located as "the step before the first step greater than `current`". A
/// value below the table floors to index 0; a value at or above the top
/// stays on the last index.
fn base_index(current: f64) -> usize {
    match GPA_STEPS.iter().position(|&step| step > current) {
        Some(first_greater) => first_greater.saturating_sub(1),
        None => GPA_STEPS.len() - 1,
    }
}

/// The step adjacent to `current_gpa`'s base step in `direction`, clamped to
/// the table's bounds.
pub fn next_gpa_step(current_gpa: f64, direction: StepDirection) -> f64 {
    let base = base_index(current_gpa);
    let next = match direction {
        StepDirection::Up => (base + 1).min(GPA_STEPS.len() - 1),
        StepDirection::Down => base.saturating_sub(1),
    };
    GPA_STEPS[next]
}
