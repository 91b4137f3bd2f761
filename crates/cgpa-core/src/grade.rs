//! Letter grades and the fixed grade-point scale.
//!
//! | Grade | Point |
//! |-------|-------|
//! | A+    | 4.00  |
//! | A     | 3.75  |
//! | A-    | 3.50  |
//! | B+    | 3.25  |
//! | B     | 3.00  |
//! | B-    | 2.75  |
//! | C+    | 2.50  |
//! | C     | 2.25  |
//! | C-    | 2.00  |
//! | D     | 1.00  |
//! | F     | 0.00  |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GradebookError;

/// A letter grade on the eleven-step scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// Every grade, best first.
    pub const ALL: [Grade; 11] = [
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::D,
        Grade::F,
    ];

    /// Grade points for this grade.
    pub fn point(self) -> f64 {
        match self {
            Grade::APlus => 4.0,
            Grade::A => 3.75,
            Grade::AMinus => 3.5,
            Grade::BPlus => 3.25,
            Grade::B => 3.0,
            Grade::BMinus => 2.75,
            Grade::CPlus => 2.5,
            Grade::C => 2.25,
            Grade::CMinus => 2.0,
            Grade::D => 1.0,
            Grade::F => 0.0,
        }
    }

    /// Whether this grade carries GPA-bearing credit (point > 0).
    pub fn is_passing(self) -> bool {
        self.point() > 0.0
    }

    /// The grade token, e.g. `"B+"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = GradebookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_uppercase();
        Grade::ALL
            .into_iter()
            .find(|g| g.as_str() == token)
            .ok_or_else(|| GradebookError::UnknownGrade(s.to_string()))
    }
}

/// Convert a grade to its point value.
pub fn point_for_grade(grade: Grade) -> f64 {
    grade.point()
}

/// Map a point value back to a display grade.
///
/// Uses floor semantics: the result is the grade whose breakpoint is the
/// largest one not exceeding `point`. Callers clamp to `[0.0, 4.0]` first;
/// NaN is not a meaningful input and falls through to `F`.
pub fn grade_for_point(point: f64) -> Grade {
    Grade::ALL
        .into_iter()
        .find(|g| point >= g.point())
        .unwrap_or(Grade::F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_table() {
        assert_eq!(point_for_grade(Grade::APlus), 4.0);
        assert_eq!(point_for_grade(Grade::A), 3.75);
        assert_eq!(point_for_grade(Grade::BMinus), 2.75);
        assert_eq!(point_for_grade(Grade::CMinus), 2.0);
        assert_eq!(point_for_grade(Grade::D), 1.0);
        assert_eq!(point_for_grade(Grade::F), 0.0);
    }

    #[test]
    fn points_never_increase_down_the_scale() {
        for pair in Grade::ALL.windows(2) {
            assert!(pair[0].point() >= pair[1].point(), "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn round_trip_at_breakpoints() {
        for g in Grade::ALL {
            assert_eq!(grade_for_point(point_for_grade(g)), g);
        }
    }

    #[test]
    fn floor_between_breakpoints() {
        assert_eq!(grade_for_point(3.9), Grade::A);
        assert_eq!(grade_for_point(3.74), Grade::AMinus);
        assert_eq!(grade_for_point(1.99), Grade::D);
        assert_eq!(grade_for_point(0.5), Grade::F);
        assert_eq!(grade_for_point(4.0), Grade::APlus);
    }

    #[test]
    fn parse_tokens() {
        assert_eq!("A+".parse::<Grade>().unwrap(), Grade::APlus);
        assert_eq!(" b- ".parse::<Grade>().unwrap(), Grade::BMinus);
        assert_eq!("f".parse::<Grade>().unwrap(), Grade::F);
        assert!(matches!(
            "E".parse::<Grade>(),
            Err(GradebookError::UnknownGrade(_))
        ));
        assert!("A++".parse::<Grade>().is_err());
    }

    #[test]
    fn display_matches_serde_token() {
        for g in Grade::ALL {
            let json = serde_json::to_string(&g).unwrap();
            assert_eq!(json, format!("\"{g}\""));
        }
    }

    #[test]
    fn only_f_is_failing() {
        let failing: Vec<Grade> = Grade::ALL.into_iter().filter(|g| !g.is_passing()).collect();
        assert_eq!(failing, vec![Grade::F]);
    }
}
