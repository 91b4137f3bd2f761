//! The `cgpa add-course`, `cgpa update-course` and `cgpa remove-course` commands.

use anyhow::Result;

use cgpa_core::catalog;
use cgpa_core::grade::Grade;
use cgpa_core::model::{CourseUpdate, NewCourse};

use super::{fmt_gpa, Paths, Session};

/// Credit hours used when neither `--credits` nor `--code` supplies one.
const DEFAULT_CREDITS: f64 = 3.0;

pub fn add(
    paths: &Paths,
    semester: &str,
    name: Option<String>,
    credits: Option<f64>,
    grade: Option<Grade>,
    code: Option<String>,
) -> Result<()> {
    let mut session = Session::open(paths)?;
    let semester_id = session.semester_id(semester)?;
    let grade = grade.unwrap_or(session.config.default_grade);

    let course = match code {
        Some(code) => {
            let mut course = catalog::lookup(&code)?.to_new_course(grade);
            if let Some(name) = name {
                course.name = name;
            }
            if let Some(credits) = credits {
                course.credit_hours = credits;
            }
            course
        }
        None => {
            let name = name.ok_or_else(|| anyhow::anyhow!("either --name or --code is required"))?;
            NewCourse::new(name, credits.unwrap_or(DEFAULT_CREDITS), grade)
        }
    };

    let added = session.book.add_course(&semester_id, course)?;
    println!("Course \"{}\" added (id: {})", added.name, added.id);
    print_totals(&session, &semester_id);
    session.save();
    Ok(())
}

pub fn update(
    paths: &Paths,
    semester: &str,
    course_id: &str,
    name: Option<String>,
    credits: Option<f64>,
    grade: Option<Grade>,
) -> Result<()> {
    let update = CourseUpdate {
        name,
        credit_hours: credits,
        grade,
    };
    anyhow::ensure!(
        !update.is_empty(),
        "nothing to update: pass --name, --credits or --grade"
    );

    let mut session = Session::open(paths)?;
    let semester_id = session.semester_id(semester)?;
    let updated = session.book.update_course(&semester_id, course_id, update)?;
    println!(
        "Course \"{}\" updated: {} credits, grade {}",
        updated.name, updated.credit_hours, updated.grade
    );
    print_totals(&session, &semester_id);
    session.save();
    Ok(())
}

pub fn remove(paths: &Paths, semester: &str, course_id: &str) -> Result<()> {
    let mut session = Session::open(paths)?;
    let semester_id = session.semester_id(semester)?;
    let removed = session.book.remove_course(&semester_id, course_id)?;
    println!("Course \"{}\" removed", removed.name);
    print_totals(&session, &semester_id);
    session.save();
    Ok(())
}

fn print_totals(session: &Session, semester_id: &str) {
    let record = session.book.record();
    if let Some(semester) = session.book.semester(semester_id) {
        println!(
            "Semester GPA: {} ({} credits) | CGPA: {} ({} credits)",
            fmt_gpa(semester.gpa),
            semester.total_credits,
            fmt_gpa(record.cgpa),
            record.total_credits
        );
    }
}
