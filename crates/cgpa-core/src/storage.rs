//! Persistence of the aggregate record.
//!
//! Storage sits outside the engine. Failures here are logged and never cost
//! the caller its in-memory state or its saved history: an unreadable file is
//! moved aside before an empty record takes its place, and a failed save is
//! reported while the program carries on.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::engine::recompute_aggregate;
use crate::model::AggregateRecord;

/// Current on-disk document version.
pub const DOCUMENT_VERSION: u32 = 1;

/// Backend that can hold one aggregate record.
pub trait DataStore {
    /// Load the stored record, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<AggregateRecord>>;

    /// Replace the stored record.
    fn save(&self, record: &AggregateRecord) -> Result<()>;

    /// Remove any stored record.
    fn clear(&self) -> Result<()>;

    /// Move unreadable stored data out of the way so the next save cannot
    /// overwrite it, returning where it went. Stores that cannot do this
    /// refuse, which makes [`load_or_default`] fail rather than start empty.
    fn quarantine(&self) -> Result<PathBuf> {
        anyhow::bail!("this store cannot set unreadable data aside")
    }
}

/// The JSON document written by [`JsonFileStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub data: AggregateRecord,
}

/// Stores the record as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First free `<file>.bak`, `<file>.1.bak`, ... next to the data file.
    fn backup_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cgpa-data.json".to_string());
        let mut candidate = self.path.with_file_name(format!("{file_name}.bak"));
        let mut n = 1;
        while candidate.exists() {
            candidate = self.path.with_file_name(format!("{file_name}.{n}.bak"));
            n += 1;
        }
        candidate
    }
}

/// Parse a data file: the versioned document, or a bare record as written by
/// `cgpa export --format json`.
fn parse_data(content: &str) -> Result<(u32, AggregateRecord)> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if value.get("data").is_some() || value.get("version").is_some() {
        let document: StoredDocument = serde_json::from_value(value)?;
        Ok((document.version, document.data))
    } else if value.get("semesters").is_some() {
        let record: AggregateRecord = serde_json::from_value(value)?;
        Ok((DOCUMENT_VERSION, record))
    } else {
        anyhow::bail!("neither a gradebook document nor an exported record")
    }
}

impl DataStore for JsonFileStore {
    fn load(&self) -> Result<Option<AggregateRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no data file yet");
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read data file: {}", self.path.display()))?;
        let (version, record) = parse_data(&content)
            .with_context(|| format!("failed to parse data file: {}", self.path.display()))?;
        if version > DOCUMENT_VERSION {
            warn!(
                version,
                supported = DOCUMENT_VERSION,
                "data file was written by a newer version"
            );
        }
        Ok(Some(record))
    }

    fn save(&self, record: &AggregateRecord) -> Result<()> {
        let document = StoredDocument {
            version: DOCUMENT_VERSION,
            saved_at: Utc::now(),
            data: record.clone(),
        };
        let json =
            serde_json::to_string_pretty(&document).context("failed to serialize record")?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create data directory: {}", parent.display())
                })?;
            }
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write data file: {}", self.path.display()))?;
        debug!(path = %self.path.display(), "record saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).with_context(|| {
                format!("failed to remove data file: {}", self.path.display())
            })?;
        }
        Ok(())
    }

    fn quarantine(&self) -> Result<PathBuf> {
        if !self.path.is_file() {
            anyhow::bail!("data path is not a file: {}", self.path.display());
        }
        let backup = self.backup_path();
        std::fs::rename(&self.path, &backup).with_context(|| {
            format!(
                "failed to move {} to {}",
                self.path.display(),
                backup.display()
            )
        })?;
        Ok(backup)
    }
}

/// In-process store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<AggregateRecord>>,
    save_count: AtomicU32,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with `record`.
    pub fn with_record(record: AggregateRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
            ..Self::default()
        }
    }

    /// A store whose every save fails.
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> u32 {
        self.save_count.load(Ordering::Relaxed)
    }

    /// The currently stored record.
    pub fn stored(&self) -> Option<AggregateRecord> {
        self.record.lock().ok().and_then(|r| r.clone())
    }
}

impl DataStore for MemoryStore {
    fn load(&self) -> Result<Option<AggregateRecord>> {
        let guard = self
            .record
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, record: &AggregateRecord) -> Result<()> {
        if self.fail_saves {
            anyhow::bail!("memory store configured to fail saves");
        }
        let mut guard = self
            .record
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        *guard = Some(record.clone());
        self.save_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .record
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

/// Load the stored record, falling back to an empty one.
///
/// The loaded record is always recomputed, so stale or hand-edited derived
/// fields never survive a load. Unreadable data is quarantined before the
/// empty record is returned; if it cannot be moved aside the load fails, so
/// a later save never overwrites it.
pub fn load_or_default(store: &dyn DataStore) -> Result<AggregateRecord> {
    match store.load() {
        Ok(Some(record)) => Ok(recompute_aggregate(record.semesters)),
        Ok(None) => Ok(AggregateRecord::default()),
        Err(e) => {
            error!(error = %format!("{e:#}"), "failed to load saved data");
            let backup = store
                .quarantine()
                .with_context(|| format!("unreadable saved data left in place: {e:#}"))?;
            warn!(backup = %backup.display(), "unreadable data moved aside, starting empty");
            Ok(AggregateRecord::default())
        }
    }
}

/// Save the record, logging instead of failing. Returns whether it was saved.
pub fn persist(store: &dyn DataStore, record: &AggregateRecord) -> bool {
    match store.save(record) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "failed to save data, continuing with in-memory state");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::Grade;
    use crate::gradebook::Gradebook;
    use crate::model::NewCourse;

    fn sample_record() -> AggregateRecord {
        let mut book = Gradebook::new();
        let id = book.add_semester("Fall 2024").unwrap().id.clone();
        book.add_course(&id, NewCourse::new("Algorithms", 4.0, Grade::AMinus))
            .unwrap();
        book.add_course(&id, NewCourse::new("Statistics", 3.0, Grade::F))
            .unwrap();
        book.into_record()
    }

    #[test]
    fn json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("data.json"));
        let record = sample_record();

        store.save(&record).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load().unwrap().is_none());
        assert_eq!(load_or_default(&store).unwrap(), AggregateRecord::default());
    }

    #[test]
    fn corrupt_file_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().is_err());
        assert_eq!(load_or_default(&store).unwrap(), AggregateRecord::default());

        let backup = dir.path().join("data.json.bak");
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "{ not json");
        assert!(!path.exists());

        // A save afterwards leaves the backup alone.
        store.save(&sample_record()).unwrap();
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "{ not json");
    }

    #[test]
    fn unknown_grade_keeps_original_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = JsonFileStore::new(&path);
        store.save(&sample_record()).unwrap();

        let edited = std::fs::read_to_string(&path)
            .unwrap()
            .replace("\"A-\"", "\"E\"");
        std::fs::write(&path, &edited).unwrap();
        std::fs::write(dir.path().join("data.json.bak"), "older backup").unwrap();

        assert_eq!(load_or_default(&store).unwrap(), AggregateRecord::default());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("data.json.1.bak")).unwrap(),
            edited
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("data.json.bak")).unwrap(),
            "older backup"
        );
    }

    #[test]
    fn unreadable_directory_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(load_or_default(&store).is_err());
        assert!(dir.path().exists());
    }

    #[test]
    fn damaged_document_is_not_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        std::fs::write(store.path(), r#"{ "data": { "semesters": 3 } }"#).unwrap();
        assert!(store.load().is_err());
        std::fs::write(store.path(), r#"{ "savedAt": "2024-01-01T00:00:00Z" }"#).unwrap();
        assert!(store.load().is_err());
    }

    struct Unreadable;

    impl DataStore for Unreadable {
        fn load(&self) -> Result<Option<AggregateRecord>> {
            anyhow::bail!("backend offline")
        }
        fn save(&self, _record: &AggregateRecord) -> Result<()> {
            Ok(())
        }
        fn clear(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn store_without_quarantine_fails_the_load() {
        let err = load_or_default(&Unreadable).unwrap_err();
        assert!(format!("{err:#}").contains("backend offline"));
    }

    #[test]
    fn bare_record_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        let record = sample_record();
        std::fs::write(&path, serde_json::to_string_pretty(&record).unwrap()).unwrap();

        let loaded = JsonFileStore::new(&path).load().unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn document_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        JsonFileStore::new(&path).save(&sample_record()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["version"], 1);
        assert!(value["savedAt"].is_string());
        assert_eq!(value["data"]["totalCredits"], 4.0);
        assert_eq!(value["data"]["semesters"][0]["courses"][1]["grade"], "F");
    }

    #[test]
    fn clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        store.save(&sample_record()).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn load_recomputes_stale_fields() {
        let mut record = sample_record();
        record.cgpa = 0.1;
        record.semesters[0].gpa = 0.2;
        let store = MemoryStore::with_record(record);

        let loaded = load_or_default(&store).unwrap();
        assert_eq!(loaded.cgpa, 3.5);
        assert_eq!(loaded.semesters[0].gpa, 3.5);
    }

    #[test]
    fn persist_logs_and_continues() {
        let store = MemoryStore::failing();
        assert!(!persist(&store, &sample_record()));
        assert_eq!(store.save_count(), 0);

        let store = MemoryStore::new();
        assert!(persist(&store, &sample_record()));
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.stored().unwrap().total_credits, 4.0);
    }
}
