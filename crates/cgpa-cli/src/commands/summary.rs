//! The `cgpa summary` and `cgpa trend` commands.

use anyhow::Result;
use comfy_table::{Cell, Table};

use cgpa_core::analytics::{cgpa_trend, Summary};

use super::{fmt_gpa, Paths, Session};

pub fn execute(paths: &Paths, json: bool) -> Result<()> {
    let session = Session::open(paths)?;
    let summary = Summary::of(session.book.record());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "CGPA: {} / 4.0 ({}, {:.0}%)",
        fmt_gpa(summary.cgpa),
        summary.band.label(),
        summary.progress_percent
    );
    println!("Total credits: {}", summary.total_credits);
    println!(
        "Semesters: {} | Courses: {}",
        summary.semester_count, summary.course_count
    );
    if summary.failed_credits > 0.0 {
        println!(
            "Failed credits (excluded from GPA): {}",
            summary.failed_credits
        );
    }
    if let Some(best) = &summary.best_semester {
        println!("Best semester: {best}");
    }
    Ok(())
}

pub fn trend(paths: &Paths) -> Result<()> {
    let session = Session::open(paths)?;
    let points = cgpa_trend(session.book.semesters());

    if points.is_empty() {
        println!("No semesters yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Semester", "GPA", "CGPA to date", "Credits"]);
    for point in &points {
        table.add_row(vec![
            Cell::new(&point.name),
            Cell::new(fmt_gpa(point.gpa)),
            Cell::new(fmt_gpa(point.cgpa)),
            Cell::new(point.credits),
        ]);
    }
    println!("{table}");
    Ok(())
}
