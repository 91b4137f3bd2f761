//! The `cgpa export` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use cgpa_report::{write_html_report, write_markdown_report};

use super::{Paths, Session};

pub fn execute(paths: &Paths, format: &str, output: PathBuf) -> Result<()> {
    let session = Session::open(paths)?;
    let record = session.book.record();

    match format {
        "html" => write_html_report(record, &output)?,
        "markdown" | "md" => write_markdown_report(record, &output)?,
        "json" => {
            let json = serde_json::to_string_pretty(record)?;
            std::fs::write(&output, json)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        other => anyhow::bail!("unknown format: {other} (expected html, markdown or json)"),
    }

    println!("Exported {} to {}", format, output.display());
    Ok(())
}
