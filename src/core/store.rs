//! # Key-Value Store
//!
//! A small persisted record store with per-entry expiry, the local
//! equivalent of a browser cookie jar.
//!
//! ```text
//! KeyValueStore (trait)
//! ├── FileStore    // one JSON file, atomic writes (.tmp + rename)
//! └── MemoryStore  // HashMap, for tests
//! ```
//!
//! Each entry carries an absolute expiry time. Expired entries read as
//! absent and are dropped on the next write.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Corrupt(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store I/O error: {e}"),
            StoreError::Corrupt(e) => write!(f, "store file is corrupt: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// A persisted value and when it stops being readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

pub trait KeyValueStore {
    /// The value under `key`, or None if missing or expired.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, readable for `ttl` from now.
    fn set(&mut self, key: &str, value: &str, ttl: TimeDelta) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

// ============================================================================
// FileStore
// ============================================================================

/// All entries in one JSON object keyed by name.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<HashMap<String, Entry>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(StoreError::Corrupt),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Entries to build the next write on. A corrupt file is replaced rather
    /// than blocking writes forever.
    fn entries_for_write(&self) -> Result<HashMap<String, Entry>, StoreError> {
        match self.read_entries() {
            Err(StoreError::Corrupt(e)) => {
                warn!("Discarding corrupt store {}: {}", self.path.display(), e);
                Ok(HashMap::new())
            }
            other => other,
        }
    }

    fn write_entries(&self, entries: &HashMap<String, Entry>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(&self.path, entries)
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data).map_err(StoreError::Corrupt)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.read_entries()?;
        let now = Utc::now();
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str, ttl: TimeDelta) -> Result<(), StoreError> {
        let now = Utc::now();
        let mut entries = self.entries_for_write()?;
        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        self.write_entries(&entries)?;
        debug!("Stored '{}' in {}", key, self.path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let now = Utc::now();
        let mut entries = self.entries_for_write()?;
        let had_key = entries.remove(key).is_some();
        entries.retain(|_, entry| entry.is_live(now));
        if had_key {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an entry with an explicit expiry (e.g. one already in the past).
    pub fn insert_raw(&mut self, key: &str, entry: Entry) {
        self.entries.insert(key.to_string(), entry);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Utc::now();
        Ok(self
            .entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str, ttl: TimeDelta) -> Result<(), StoreError> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Utc::now() + ttl,
            },
        );
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
