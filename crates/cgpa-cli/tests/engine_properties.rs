//! Aggregation engine properties exercised through the public API.

use cgpa_core::engine::{
    cumulative_credits, cumulative_gpa, recompute_aggregate, round_to_hundredths,
    semester_credits, semester_gpa,
};
use cgpa_core::grade::{grade_for_point, point_for_grade, Grade};
use cgpa_core::model::{Course, NewCourse, Semester};
use cgpa_core::stepper::{next_gpa_step, StepDirection};

fn course(credits: f64, grade: Grade) -> Course {
    NewCourse::new(format!("{grade} course"), credits, grade).with_id(format!("{grade}/{credits}"))
}

fn semester(name: &str, courses: Vec<Course>) -> Semester {
    let mut s = Semester::new(name, name);
    s.courses = courses;
    s
}

#[test]
fn grade_point_round_trip() {
    for grade in Grade::ALL {
        assert_eq!(grade_for_point(point_for_grade(grade)), grade);
    }
}

#[test]
fn empty_inputs() {
    assert_eq!(semester_gpa(&[]), 0.0);
    assert_eq!(semester_credits(&[]), 0.0);
    assert_eq!(cumulative_gpa(&[]), 0.0);
    assert_eq!(cumulative_credits(&[]), 0.0);
}

#[test]
fn all_f_semester() {
    let courses = [course(3.0, Grade::F), course(4.0, Grade::F)];
    assert_eq!(semester_gpa(&courses), 0.0);
    assert_eq!(semester_credits(&courses), 0.0);
}

#[test]
fn mixed_semester() {
    let courses = [course(3.0, Grade::APlus), course(3.0, Grade::B)];
    assert_eq!(semester_gpa(&courses), 3.5);
    assert_eq!(semester_credits(&courses), 6.0);
}

#[test]
fn one_f_among_passes() {
    let courses = [course(3.0, Grade::A), course(3.0, Grade::F)];
    assert_eq!(semester_gpa(&courses), 3.75);
    assert_eq!(semester_credits(&courses), 3.0);
}

#[test]
fn cumulative_is_not_an_average_of_rounded_semesters() {
    let semesters = vec![
        semester("one", vec![course(1.0, Grade::APlus)]),
        semester("two", vec![course(3.0, Grade::C)]),
    ];
    let record = recompute_aggregate(semesters);

    let naive = round_to_hundredths(
        record.semesters.iter().map(|s| s.gpa).sum::<f64>() / record.semesters.len() as f64,
    );
    assert_eq!(naive, 3.13);
    assert_eq!(record.cgpa, 2.69);
    assert!((naive - record.cgpa).abs() >= 0.01);
}

#[test]
fn cumulative_avoids_double_rounding() {
    // Each semester: (3.5 + 2 * 2.5) / 3 = 2.8333 -> 2.83 when rounded.
    // Three semesters plus a 1-credit D: flattened = (25.5 + 1) / 10 = 2.65,
    // while weighting the rounded semester GPAs gives (2.83 * 9 + 1) / 10 = 2.647.
    let per_term = || vec![course(1.0, Grade::AMinus), course(2.0, Grade::CPlus)];
    let semesters = vec![
        semester("one", per_term()),
        semester("two", per_term()),
        semester("three", per_term()),
        semester("four", vec![course(1.0, Grade::D)]),
    ];
    let record = recompute_aggregate(semesters);
    assert_eq!(record.semesters[0].gpa, 2.83);
    assert_eq!(record.cgpa, 2.65);
    assert_eq!(record.total_credits, 10.0);
}

#[test]
fn stepper_bounds() {
    assert_eq!(next_gpa_step(0.0, StepDirection::Down), 0.0);
    assert_eq!(next_gpa_step(4.0, StepDirection::Up), 4.0);
    assert_eq!(next_gpa_step(2.1, StepDirection::Up), 2.25);
}

#[test]
fn recompute_is_idempotent() {
    let semesters = vec![
        semester(
            "one",
            vec![course(3.0, Grade::BMinus), course(1.5, Grade::APlus)],
        ),
        semester("two", vec![course(4.0, Grade::F), course(2.0, Grade::CPlus)]),
    ];

    let first = recompute_aggregate(semesters.clone());
    let second = recompute_aggregate(semesters);
    assert_eq!(first, second);
    assert_eq!(first.cgpa.to_bits(), second.cgpa.to_bits());
    assert_eq!(first.total_credits.to_bits(), second.total_credits.to_bits());

    let again = recompute_aggregate(first.semesters.clone());
    assert_eq!(again, first);
}
