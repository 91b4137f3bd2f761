//! HTML transcript generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use cgpa_core::analytics::{cgpa_trend, credit_distribution, GpaBand, Summary};
use cgpa_core::model::{AggregateRecord, Semester};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML transcript from an aggregate record.
pub fn generate_html(record: &AggregateRecord) -> String {
    let summary = Summary::of(record);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>CGPA transcript: {:.2}</title>\n",
        record.cgpa
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>CGPA transcript</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} semesters | {} courses | generated {}</p>\n",
        summary.semester_count,
        summary.course_count,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>CGPA</th><th>Credits</th><th>Failed credits</th><th>Semesters</th><th>Best semester</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    html.push_str(&format!(
        "<tr><td style=\"color: {}\"><strong>{:.2}</strong> / 4.0</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        summary.band.color(),
        summary.cgpa,
        summary.total_credits,
        summary.failed_credits,
        summary.semester_count,
        summary
            .best_semester
            .as_deref()
            .map(html_escape)
            .unwrap_or_else(|| "-".to_string()),
    ));
    html.push_str("</tbody></table>\n");
    html.push_str(&format!(
        "<div class=\"progress\"><div class=\"bar\" style=\"width: {:.0}%; background: {}\"></div></div>\n",
        summary.progress_percent,
        summary.band.color()
    ));

    if !record.semesters.is_empty() {
        let gpa_bars: Vec<Bar<'_>> = record
            .semesters
            .iter()
            .map(|s| Bar {
                label: &s.name,
                value: s.gpa,
                color: GpaBand::of(s.gpa).color(),
            })
            .collect();
        html.push_str("<h3>GPA by semester</h3>\n");
        html.push_str(&bar_chart(&gpa_bars, 4.0, 2));

        let distribution = credit_distribution(&record.semesters);
        let max_credits = distribution
            .iter()
            .map(|b| b.credits)
            .fold(0.0_f64, f64::max);
        let credit_bars: Vec<Bar<'_>> = distribution
            .iter()
            .map(|b| Bar {
                label: &b.name,
                value: b.credits,
                color: b.band.color(),
            })
            .collect();
        html.push_str("<h3>Credits by semester</h3>\n");
        html.push_str(&bar_chart(&credit_bars, max_credits, 1));
    }

    html.push_str("</section>\n");

    // Per-semester courses
    html.push_str("<section class=\"semesters\">\n");
    html.push_str("<h2>Semesters</h2>\n");
    let trend = cgpa_trend(&record.semesters);
    for (semester, point) in record.semesters.iter().zip(&trend) {
        html.push_str(&semester_table(semester, point.cgpa));
    }
    if record.semesters.is_empty() {
        html.push_str("<p class=\"meta\">No semesters recorded yet.</p>\n");
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(record)
            .unwrap_or_default()
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML transcript to a file.
pub fn write_html_report(record: &AggregateRecord, path: &Path) -> Result<()> {
    let html = generate_html(record);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn semester_table(semester: &Semester, running_cgpa: f64) -> String {
    let band = GpaBand::of(semester.gpa);
    let mut out = format!(
        "<h3>{} <span class=\"gpa\" style=\"color: {}\">GPA {:.2}</span> <span class=\"meta\">({} credits, CGPA to date {:.2})</span></h3>\n",
        html_escape(&semester.name),
        band.color(),
        semester.gpa,
        semester.total_credits,
        running_cgpa
    );

    if semester.courses.is_empty() {
        out.push_str("<p class=\"meta\">No courses.</p>\n");
        return out;
    }

    out.push_str("<table class=\"courses\">\n");
    out.push_str("<thead><tr><th>Course</th><th>Credits</th><th>Grade</th><th>Points</th></tr></thead>\n");
    out.push_str("<tbody>\n");
    for course in &semester.courses {
        let class = if course.grade.is_passing() {
            "pass"
        } else {
            "fail"
        };
        out.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>\n",
            class,
            html_escape(&course.name),
            course.credit_hours,
            course.grade,
            course.grade.point()
        ));
    }
    out.push_str("</tbody></table>\n");
    out
}

struct Bar<'a> {
    label: &'a str,
    value: f64,
    color: &'a str,
}

/// Horizontal SVG bar chart. Bars are scaled against `scale`; a zero scale
/// draws empty bars.
fn bar_chart(bars: &[Bar<'_>], scale: f64, decimals: usize) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = bars.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, bar) in bars.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = if scale > 0.0 {
            (bar.value / scale * max_width as f64) as usize
        } else {
            0
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(bar.label)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, bar.color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.*}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            decimals,
            bar.value
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; font-weight: normal; font-size: 0.9rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.progress { height: 8px; background: var(--border); border-radius: 4px; overflow: hidden; }
.progress .bar { height: 100%; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
