//! The `cgpa init` command.

use anyhow::Result;

use cgpa_core::config::SAMPLE_CONFIG;

pub fn execute() -> Result<()> {
    if std::path::Path::new("cgpa.toml").exists() {
        println!("cgpa.toml already exists, skipping.");
    } else {
        std::fs::write("cgpa.toml", SAMPLE_CONFIG)?;
        println!("Created cgpa.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: cgpa add-semester \"Fall 2024\"");
    println!("  2. Run: cgpa add-course --semester \"Fall 2024\" --code CS301 --grade A-");
    println!("  3. Run: cgpa summary");

    Ok(())
}
