//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use cgpa_core::config::{load_config_from, CgpaConfig};
use cgpa_core::error::GradebookError;
use cgpa_core::gradebook::Gradebook;
use cgpa_core::storage::{load_or_default, persist, JsonFileStore};

pub mod catalog;
pub mod convert;
pub mod course;
pub mod export;
pub mod init;
pub mod semester;
pub mod show;
pub mod summary;

/// Global path options shared by every subcommand.
pub struct Paths {
    pub config: Option<PathBuf>,
    pub data: Option<PathBuf>,
}

/// A loaded gradebook bound to the file it came from.
pub struct Session {
    pub config: CgpaConfig,
    pub store: JsonFileStore,
    pub book: Gradebook,
}

impl Session {
    /// Load config and the gradebook it points at.
    pub fn open(paths: &Paths) -> Result<Self> {
        let config = load_config_from(paths.config.as_deref())?;
        let data_file = paths
            .data
            .clone()
            .unwrap_or_else(|| config.data_file.clone());
        debug!(data_file = %data_file.display(), "opening gradebook");

        let store = JsonFileStore::new(data_file);
        let book = Gradebook::from_record(load_or_default(&store)?)
            .with_policy(config.credit_policy());

        Ok(Self {
            config,
            store,
            book,
        })
    }

    /// Resolve a semester selector (id or name) to an id.
    pub fn semester_id(&self, selector: &str) -> Result<String> {
        self.book
            .find_semester(selector)
            .map(|s| s.id.clone())
            .ok_or_else(|| GradebookError::SemesterNotFound(selector.to_string()).into())
    }

    /// Persist the current record. A failed save is logged by `persist` and
    /// is not fatal.
    pub fn save(&self) {
        if persist(&self.store, self.book.record()) {
            debug!(data_file = %self.store.path().display(), "gradebook saved");
        }
    }
}

/// Format a GPA the way every command prints it.
pub fn fmt_gpa(gpa: f64) -> String {
    format!("{gpa:.2}")
}
