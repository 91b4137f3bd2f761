//! The `cgpa catalog` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use cgpa_core::catalog;

pub fn execute(query: Option<&str>) -> Result<()> {
    let entries: Vec<_> = match query {
        Some(q) => catalog::search(q),
        None => catalog::entries().iter().collect(),
    };

    if entries.is_empty() {
        println!("No catalog courses match.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Code", "Course", "Credits"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.code),
            Cell::new(entry.name),
            Cell::new(entry.credit_hours),
        ]);
    }
    println!("{table}");
    Ok(())
}
