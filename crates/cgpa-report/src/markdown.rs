//! Markdown transcript generator.

use std::path::Path;

use anyhow::{Context, Result};

use cgpa_core::analytics::{cgpa_trend, Summary};
use cgpa_core::model::AggregateRecord;

/// Escape characters that would break a Markdown table cell.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Format the record as a Markdown transcript.
pub fn generate_markdown(record: &AggregateRecord) -> String {
    let summary = Summary::of(record);
    let mut md = String::new();

    md.push_str("# CGPA transcript\n\n");
    md.push_str(&format!(
        "**CGPA:** {:.2} / 4.0 ({} credits, {} semesters, {} courses)\n\n",
        summary.cgpa, summary.total_credits, summary.semester_count, summary.course_count
    ));
    if summary.failed_credits > 0.0 {
        md.push_str(&format!(
            "_{} credit hours graded F are excluded from GPA credit._\n\n",
            summary.failed_credits
        ));
    }

    if record.semesters.is_empty() {
        md.push_str("No semesters recorded yet.\n");
        return md;
    }

    md.push_str("## Progress\n\n");
    md.push_str("| Semester | GPA | CGPA to date | Credits |\n");
    md.push_str("|----------|-----|--------------|---------|\n");
    for point in cgpa_trend(&record.semesters) {
        md.push_str(&format!(
            "| {} | {:.2} | {:.2} | {} |\n",
            cell(&point.name),
            point.gpa,
            point.cgpa,
            point.credits
        ));
    }
    md.push('\n');

    for semester in &record.semesters {
        md.push_str(&format!(
            "## {} (GPA {:.2})\n\n",
            cell(&semester.name),
            semester.gpa
        ));
        if semester.courses.is_empty() {
            md.push_str("No courses.\n\n");
            continue;
        }
        md.push_str("| Course | Credits | Grade | Points |\n");
        md.push_str("|--------|---------|-------|--------|\n");
        for course in &semester.courses {
            md.push_str(&format!(
                "| {} | {} | {} | {:.2} |\n",
                cell(&course.name),
                course.credit_hours,
                course.grade,
                course.grade.point()
            ));
        }
        md.push('\n');
    }

    md
}

/// Write a Markdown transcript to a file.
pub fn write_markdown_report(record: &AggregateRecord, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_markdown(record))
        .with_context(|| format!("failed to write transcript to {}", path.display()))?;
    Ok(())
}
