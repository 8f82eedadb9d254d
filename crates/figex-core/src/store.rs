//! Persisted store of human-confirmed extraction overrides.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;

/// A human-validated extraction, keyed by the verbatim snippet that was on
/// screen when the user confirmed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedEntry {
    /// Verbatim source snippet present at confirmation time.
    pub source_text: String,
    /// Confirmed numeric value.
    pub value: f64,
    /// When the confirmation was recorded. Informational only: match order
    /// is storage order, not recency.
    pub recorded_at: DateTime<Utc>,
}

/// On-disk store of confirmed overrides, label -> ordered entry list.
///
/// The file is the source of truth: every lookup re-reads it so that
/// confirmations written by other processes are visible immediately. Writes
/// append to the label's list and atomically replace the whole file;
/// last-writer-wins under concurrent confirmation is acceptable.
pub struct ConfirmationStore {
    path: PathBuf,
}

impl ConfirmationStore {
    /// Create a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First confirmed value for `label` whose snippet occurs verbatim in
    /// `text`, in storage order: older confirmations keep priority.
    pub fn lookup(&self, text: &str, label: &str) -> Option<f64> {
        self.load()
            .get(label)?
            .iter()
            .find(|entry| text.contains(&entry.source_text))
            .map(|entry| entry.value)
    }

    /// Append a confirmation for `label` and persist the full store.
    pub fn record(&self, label: &str, source_text: &str, value: f64) -> Result<(), StoreError> {
        let mut entries = self.load();
        entries
            .entry(label.to_string())
            .or_default()
            .push(ConfirmedEntry {
                source_text: source_text.to_string(),
                value,
                recorded_at: Utc::now(),
            });
        self.write(&entries)
    }

    /// All entries, freshly read from disk. A missing or malformed file
    /// reads as an empty store so corrupt confirmation history can never
    /// fail an extraction.
    pub fn load(&self) -> BTreeMap<String, Vec<ConfirmedEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(err) => {
                warn!("failed to read confirmation store {}: {}", self.path.display(), err);
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("malformed confirmation store {}: {}", self.path.display(), err);
                BTreeMap::new()
            }
        }
    }

    fn write(&self, entries: &BTreeMap<String, Vec<ConfirmedEntry>>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path)
            .map_err(|err| StoreError::Persist(err.to_string()))?;

        debug!("confirmation store written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ConfirmationStore {
        ConfirmationStore::new(dir.path().join("confirmed.json"))
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().is_empty());
        assert_eq!(store.lookup("any text", "Revenue"), None);
    }

    #[test]
    fn test_record_and_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.record("Revenue", "Total revenues: 1.234", 1234.0).unwrap();

        assert_eq!(
            store.lookup("...\nTotal revenues: 1.234\n...", "Revenue"),
            Some(1234.0)
        );
        assert_eq!(store.lookup("different document", "Revenue"), None);
        assert_eq!(store.lookup("Total revenues: 1.234", "Equity"), None);
    }

    #[test]
    fn test_first_stored_entry_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.record("Revenue", "Total revenues", 1.0).unwrap();
        store.record("Revenue", "Total revenues", 2.0).unwrap();

        // Both snippets match; the older confirmation keeps priority.
        assert_eq!(store.lookup("Total revenues: 5.000", "Revenue"), Some(1.0));
    }

    #[test]
    fn test_values_survive_reload_to_two_decimals() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.record("Revenue", "snippet", 1_234_567.89).unwrap();

        let reloaded = ConfirmationStore::new(store.path());
        let entries = reloaded.load();
        let value = entries["Revenue"][0].value;
        assert!((value - 1_234_567.89).abs() < 0.005);
    }

    #[test]
    fn test_malformed_store_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_empty());
        assert_eq!(store.lookup("anything", "Revenue"), None);

        // Recording over a corrupt file starts a fresh store.
        store.record("Revenue", "snippet", 9.0).unwrap();
        assert_eq!(store.lookup("snippet", "Revenue"), Some(9.0));
    }

    #[test]
    fn test_writes_are_visible_to_other_handles() {
        let dir = tempfile::tempdir().unwrap();
        let writer = store_in(&dir);
        let reader = ConfirmationStore::new(writer.path());

        assert_eq!(reader.lookup("snippet", "Revenue"), None);
        writer.record("Revenue", "snippet", 7.5).unwrap();
        assert_eq!(reader.lookup("snippet", "Revenue"), Some(7.5));
    }
}
