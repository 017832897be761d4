//! Local, bounded persistence for past check-ins.
//!
//! Storage is modeled as a small key-value capability so the same history
//! logic works over a file today and could sit on an embedded database
//! tomorrow. The log itself is append-only, newest first, capped by
//! insertion count.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::Local;
use thiserror::Error;

use crate::mood::{MoodAnalysis, MoodHistory};
use crate::trend::{self, TrendBucket};

/// The log keeps this many entries; the oldest by insertion order is
/// evicted on overflow. A count bound, not a time bound.
pub const MAX_ENTRIES: usize = 30;

/// Key under which the serialized log lives in the backing store.
pub const STORAGE_KEY: &str = "mood_history";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode history: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal persistence capability: a single string value per key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// File-backed store: one JSON file per key under a root directory.
///
/// Writes go to a temp file in the same directory and are renamed over the
/// target, so a crash mid-write never leaves a truncated record readable
/// by a later load.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        let target = self.path_for(key);
        let tmp = self.root.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store, mainly for tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// The append-only check-in log, loaded once at startup and rewritten in
/// full on every append/clear.
#[derive(Debug)]
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
    entries: Vec<MoodAnalysis>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Load the persisted log. Corrupt or unreadable storage degrades to an
    /// empty history instead of failing — the trend view stays functional.
    pub fn load(store: S) -> Self {
        let entries = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<MoodHistory>(&raw) {
                Ok(history) => history.entries,
                Err(err) => {
                    tracing::warn!(error = %err, "history log was corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "history log was unreadable, starting empty");
                Vec::new()
            }
        };
        Self { store, entries }
    }

    /// Prepend an entry, evict past [`MAX_ENTRIES`], persist the truncated
    /// log. The in-memory log is updated even if persistence fails, matching
    /// the degraded-but-functional policy of `load`.
    pub fn append(&mut self, entry: MoodAnalysis) -> Result<(), StoreError> {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_ENTRIES);
        self.persist()
    }

    /// Drop all entries and remove the persisted record in one step.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.store.remove(STORAGE_KEY)
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[MoodAnalysis] {
        &self.entries
    }

    pub fn has_history(&self) -> bool {
        !self.entries.is_empty()
    }

    /// The 7-day trend ending on today's local calendar day, oldest first.
    pub fn last_7_days(&self) -> Vec<TrendBucket> {
        trend::last_7_days(&self.entries, Local::now().date_naive())
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let log = MoodHistory {
            entries: self.entries.clone(),
        };
        let raw = serde_json::to_string(&log)?;
        self.store.set(STORAGE_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{FileStore, HistoryStore, KeyValueStore, MAX_ENTRIES, MemoryStore, STORAGE_KEY};
    use crate::mood::{MoodAnalysis, Sentiment};

    fn entry(stress_score: u8) -> MoodAnalysis {
        MoodAnalysis {
            sentiment: Sentiment::Neutral,
            mood_tag: "steady".to_string(),
            stress_score,
            suggestions: vec!["Stay hydrated".to_string()],
            timestamp: Utc::now(),
            user_text: None,
        }
    }

    #[test]
    fn append_prepends_newest_first() {
        let mut history = HistoryStore::load(MemoryStore::default());
        history.append(entry(1)).unwrap();
        history.append(entry(2)).unwrap();
        assert_eq!(history.entries()[0].stress_score, 2);
        assert_eq!(history.entries()[1].stress_score, 1);
    }

    #[test]
    fn the_log_is_capped_at_thirty_entries() {
        let mut history = HistoryStore::load(MemoryStore::default());
        for i in 0..31u8 {
            history.append(entry(i % 11)).unwrap();
        }
        assert_eq!(history.entries().len(), MAX_ENTRIES);
        // newest is the 31st append, the very first one was evicted
        assert_eq!(history.entries()[0].stress_score, 30 % 11);
        assert_eq!(history.entries()[MAX_ENTRIES - 1].stress_score, 1);
    }

    #[test]
    fn appended_entries_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = HistoryStore::load(FileStore::new(dir.path()));
        history.append(entry(7)).unwrap();
        drop(history);

        let reloaded = HistoryStore::load(FileStore::new(dir.path()));
        assert_eq!(reloaded.entries().len(), 1);
        assert_eq!(reloaded.entries()[0].stress_score, 7);
    }

    #[test]
    fn clear_then_reload_yields_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = HistoryStore::load(FileStore::new(dir.path()));
        history.append(entry(3)).unwrap();
        history.clear().unwrap();
        assert!(!history.has_history());

        let reloaded = HistoryStore::load(FileStore::new(dir.path()));
        assert!(!reloaded.has_history());
    }

    #[test]
    fn corrupt_storage_degrades_to_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set(STORAGE_KEY, "{not valid json").unwrap();

        let history = HistoryStore::load(store);
        assert!(!history.has_history());
    }

    #[test]
    fn clearing_an_empty_store_is_not_an_error() {
        let mut history = HistoryStore::load(MemoryStore::default());
        history.clear().unwrap();
    }

    #[test]
    fn file_store_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set(STORAGE_KEY, r#"{"entries":[]}"#).unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![format!("{STORAGE_KEY}.json")]);
    }

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("absent").unwrap().is_none());
    }
}
