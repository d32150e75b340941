//! Durable storage for workout snapshots
//!
//! The whole collection is written as one JSON snapshot under a single fixed
//! key. Loading tolerates a missing or unparsable snapshot and yields an empty
//! collection, and skips individual records that no longer parse; saving never
//! swallows a failure.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::PersistenceError;
use crate::models::Workout;

/// Key the workout snapshot is stored under
pub const STORAGE_KEY: &str = "workoutTracker_workouts";

/// Trait for durable string key-value backends
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replace the value stored under `key` in one step
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Get the backend name for this store
    fn backend_name(&self) -> &'static str;
}

/// Directory-backed store keeping one file per key
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.root)?;

        // Write beside the target and rename over it so readers never see a
        // half-written snapshot.
        let target = self.path_for(key);
        let staging = self.root.join(format!("{}.json.tmp", key));
        {
            let mut file = fs::File::create(&staging)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&staging, &target)?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

/// In-process store, optionally bounded by a byte quota per value
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any value longer than `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Seed the store with an existing value
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(PersistenceError::QuotaExceeded {
                    needed: value.len(),
                    quota,
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Reads and writes the workout collection through a key-value backend
pub struct WorkoutRepository {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl WorkoutRepository {
    /// Create a repository storing its snapshot under [`STORAGE_KEY`]
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: STORAGE_KEY.to_string(),
        }
    }

    /// Repository over a directory on disk
    pub fn open_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self::new(Box::new(FileKeyValueStore::new(data_dir)))
    }

    /// Repository held entirely in memory
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryKeyValueStore::new()))
    }

    /// Underlying backend
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialize the whole collection and write it in one call
    pub fn save(&mut self, workouts: &[Workout]) -> Result<(), PersistenceError> {
        let snapshot = serde_json::to_string(workouts)?;
        self.store.set(&self.key, &snapshot)?;

        debug!(
            backend = self.store.backend_name(),
            count = workouts.len(),
            bytes = snapshot.len(),
            "Snapshot saved"
        );
        Ok(())
    }

    /// Read the collection back
    ///
    /// A missing snapshot or one that is not a JSON array yields an empty
    /// collection. Inside a readable array, records that fail to parse are
    /// skipped and the rest are kept. Backend read failures are still
    /// returned as errors.
    pub fn load(&self) -> Result<Vec<Workout>, PersistenceError> {
        let Some(snapshot) = self.store.get(&self.key)? else {
            debug!(backend = self.store.backend_name(), "No snapshot found, starting empty");
            return Ok(Vec::new());
        };

        let records = match serde_json::from_str::<Vec<serde_json::Value>>(&snapshot) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    backend = self.store.backend_name(),
                    error = %e,
                    "Discarding unreadable snapshot, starting empty"
                );
                return Ok(Vec::new());
            }
        };

        let total = records.len();
        let workouts: Vec<Workout> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Workout>(record) {
                Ok(workout) => Some(workout),
                Err(e) => {
                    warn!(
                        backend = self.store.backend_name(),
                        index,
                        error = %e,
                        "Skipping unreadable workout record"
                    );
                    None
                }
            })
            .collect();

        debug!(
            backend = self.store.backend_name(),
            count = workouts.len(),
            skipped = total - workouts.len(),
            "Snapshot loaded"
        );
        Ok(workouts)
    }
}

impl std::fmt::Debug for WorkoutRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutRepository")
            .field("backend", &self.store.backend_name())
            .field("key", &self.key)
            .finish()
    }
}
