//! Grade-point aggregation.
//!
//! Rolls course-level grade points up into semester and cumulative figures.
//! Courses graded F are attempted but not GPA-bearing: their quality points
//! (always zero) enter the numerator while their credit hours are left out of
//! both the denominator and the credit totals. Only the final quotient is
//! rounded, to two decimal places, half-up.

use crate::model::{AggregateRecord, Course, Semester};

/// Relative nudge applied before rounding. Far below the gap between two
/// distinct GPA quotients, far above accumulated float error.
const TIE_EPSILON: f64 = 1e-9;

/// Round half-up to two decimal places.
///
/// Inputs are non-negative GPA quotients, so `f64::round` (half away from
/// zero) is half-up here. A quotient that is an exact decimal tie, such as
/// 16.275 / 4.2 = 3.875, can come out of float division a few ulps below the
/// tie; the nudge puts it back on the tie so it rounds up.
pub fn round_to_hundredths(value: f64) -> f64 {
    let scaled = value * 100.0;
    (scaled + scaled.abs() * TIE_EPSILON).round() / 100.0
}

/// Quality-point sum and GPA-bearing credit sum over a set of courses.
fn totals<'a>(courses: impl IntoIterator<Item = &'a Course>) -> (f64, f64) {
    courses
        .into_iter()
        .fold((0.0, 0.0), |(points, credits), course| {
            let bearing = if course.grade.is_passing() {
                course.credit_hours
            } else {
                0.0
            };
            (points + course.quality_points(), credits + bearing)
        })
}

fn gpa_over<'a>(courses: impl IntoIterator<Item = &'a Course>) -> f64 {
    let (points, credits) = totals(courses);
    if credits == 0.0 {
        return 0.0;
    }
    round_to_hundredths(points / credits)
}

/// GPA for one semester's courses. Empty or all-F course lists yield `0.0`.
pub fn semester_gpa(courses: &[Course]) -> f64 {
    gpa_over(courses)
}

/// GPA-bearing credit hours for one semester (F courses excluded).
///
/// This is not the enrolled credit load; a 3-credit F adds nothing here.
pub fn semester_credits(courses: &[Course]) -> f64 {
    courses
        .iter()
        .filter(|c| c.grade.is_passing())
        .map(|c| c.credit_hours)
        .sum()
}

/// Cumulative GPA, recomputed from every course of every semester.
///
/// Never derived from per-semester GPAs, which are already rounded.
pub fn cumulative_gpa(semesters: &[Semester]) -> f64 {
    gpa_over(semesters.iter().flat_map(|s| s.courses.iter()))
}

/// Sum of [`semester_credits`] across all semesters.
pub fn cumulative_credits(semesters: &[Semester]) -> f64 {
    semesters.iter().map(|s| semester_credits(&s.courses)).sum()
}

/// Refresh a semester's derived `gpa` and `total_credits` from its courses.
pub fn recompute_semester(mut semester: Semester) -> Semester {
    semester.gpa = semester_gpa(&semester.courses);
    semester.total_credits = semester_credits(&semester.courses);
    semester
}

/// Build the root aggregate from the full semester list.
///
/// Every semester's derived fields are refreshed as well, so the result is
/// consistent no matter what state the input's derived fields were in.
pub fn recompute_aggregate(semesters: Vec<Semester>) -> AggregateRecord {
    let semesters: Vec<Semester> = semesters.into_iter().map(recompute_semester).collect();
    let cgpa = cumulative_gpa(&semesters);
    let total_credits = cumulative_credits(&semesters);
    AggregateRecord {
        semesters,
        cgpa,
        total_credits,
    }
}
