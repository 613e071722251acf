//! Persistence adapter: named keys mapping to JSON arrays of words.
//!
//! Layout matches the persisted state the app has always used: per level,
//! `{levelId}_knownWords` and `{levelId}_unknownWords`, each holding a JSON
//! array of strings. The file store keeps one `<key>.json` file per key
//! under its root directory. The global scope owns no keys of its own; it
//! reads and writes the per-level keys directly.
//!
//! Loading never fails: an absent or malformed value is an empty pool.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use vocab_core::{Pools, Word};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write-through storage for per-level pools.
pub trait ProgressStore {
    /// Load a level's pools, defaulting to empty on absent or malformed data.
    fn load(&self, level: &str) -> Pools;

    /// Persist a level's pools. Completes before returning.
    fn save(&mut self, level: &str, pools: &Pools) -> Result<(), StoreError>;

    /// Drop a level's persisted pools.
    fn clear(&mut self, level: &str) -> Result<(), StoreError>;
}

fn known_key(level: &str) -> String {
    format!("{level}_knownWords")
}

fn unknown_key(level: &str) -> String {
    format!("{level}_unknownWords")
}

/// Pool files under a data directory.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Platform data directory, `./magic-word` as a last resort.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("magic-word")
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn read_words(&self, key: &str) -> Vec<Word> {
        let path = self.key_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(key, %err, "unreadable pool file, defaulting to empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(words) => words,
            Err(err) => {
                tracing::warn!(key, %err, "malformed pool value, defaulting to empty");
                Vec::new()
            }
        }
    }

    fn write_words(&self, key: &str, words: &[Word]) -> Result<(), StoreError> {
        let content = serde_json::to_string(words)?;
        fs::write(self.key_path(key), content)?;
        Ok(())
    }

    fn remove_key(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self, level: &str) -> Pools {
        Pools {
            known: self.read_words(&known_key(level)),
            unknown: self.read_words(&unknown_key(level)),
        }
    }

    fn save(&mut self, level: &str, pools: &Pools) -> Result<(), StoreError> {
        self.write_words(&known_key(level), &pools.known)?;
        self.write_words(&unknown_key(level), &pools.unknown)?;
        tracing::debug!(
            level,
            known = pools.known.len(),
            unknown = pools.unknown.len(),
            "pools written through"
        );
        Ok(())
    }

    fn clear(&mut self, level: &str) -> Result<(), StoreError> {
        self.remove_key(&known_key(level))?;
        self.remove_key(&unknown_key(level))
    }
}

/// In-memory key-value store, for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing serialization (to exercise the
    /// malformed-data path).
    pub fn set_raw(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, level: &str) -> Pools {
        let read = |key: &str| {
            self.values
                .get(key)
                .and_then(|v| serde_json::from_str(v).ok())
                .unwrap_or_default()
        };
        Pools {
            known: read(&known_key(level)),
            unknown: read(&unknown_key(level)),
        }
    }

    fn save(&mut self, level: &str, pools: &Pools) -> Result<(), StoreError> {
        self.values
            .insert(known_key(level), serde_json::to_string(&pools.known)?);
        self.values
            .insert(unknown_key(level), serde_json::to_string(&pools.unknown)?);
        Ok(())
    }

    fn clear(&mut self, level: &str) -> Result<(), StoreError> {
        self.values.remove(&known_key(level));
        self.values.remove(&unknown_key(level));
        Ok(())
    }
}
