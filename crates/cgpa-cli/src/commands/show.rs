//! The `cgpa show` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use cgpa_core::analytics::GpaBand;

use super::{fmt_gpa, Paths, Session};

pub fn execute(paths: &Paths, selector: Option<&str>) -> Result<()> {
    let session = Session::open(paths)?;

    match selector {
        Some(selector) => show_semester(&session, selector),
        None => {
            show_all(&session);
            Ok(())
        }
    }
}

fn show_all(session: &Session) {
    let record = session.book.record();
    if record.semesters.is_empty() {
        println!("No semesters yet. Run `cgpa add-semester <name>` to start.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Semester", "Id", "Courses", "Credits", "GPA", "Band"]);
    for semester in &record.semesters {
        table.add_row(vec![
            Cell::new(&semester.name),
            Cell::new(&semester.id),
            Cell::new(semester.courses.len()),
            Cell::new(semester.total_credits),
            Cell::new(fmt_gpa(semester.gpa)),
            Cell::new(GpaBand::of(semester.gpa).label()),
        ]);
    }

    println!("{table}");
    println!(
        "CGPA: {} / 4.0 | Credits: {}",
        fmt_gpa(record.cgpa),
        record.total_credits
    );
}

fn show_semester(session: &Session, selector: &str) -> Result<()> {
    let id = session.semester_id(selector)?;
    let Some(semester) = session.book.semester(&id) else {
        anyhow::bail!("semester not found: {selector}");
    };

    println!("{}", semester.name);
    if semester.courses.is_empty() {
        println!("No courses yet.");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Course", "Id", "Credits", "Grade", "Points"]);
        for course in &semester.courses {
            table.add_row(vec![
                Cell::new(&course.name),
                Cell::new(&course.id),
                Cell::new(course.credit_hours),
                Cell::new(course.grade),
                Cell::new(fmt_gpa(course.grade.point())),
            ]);
        }
        println!("{table}");
    }
    println!(
        "GPA: {} / 4.0 | Credits: {}",
        fmt_gpa(semester.gpa),
        semester.total_credits
    );
    Ok(())
}
