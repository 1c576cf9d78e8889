//! Persistence adapter for the task collection.
//!
//! The whole collection is stored as one JSON blob under a fixed key in a
//! flat key-value store. There is no schema versioning of the blob and no
//! partial writes: every save replaces the value.
//!
//! - [`KeyValueStore`]: the store seam, with [`SqliteStore`] for on-disk use
//!   and [`MemoryStore`] for tests and ephemeral sessions.
//! - [`TaskRepository`]: load/save of the collection on top of a store.
//!   Loading never fails; an absent or unparsable blob yields an empty
//!   collection and the problem is logged.

use log::{debug, warn};

use crate::{error::Result, models::Task};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Key under which the serialized collection lives.
pub const STORAGE_KEY: &str = "tasker-tasks-data";

/// Flat string key-value storage.
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Reads and writes the full task collection under [`STORAGE_KEY`].
pub struct TaskRepository {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl TaskRepository {
    /// Creates a repository over the given store using the default key.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            key: STORAGE_KEY.to_string(),
        }
    }

    /// Uses a custom key instead of [`STORAGE_KEY`].
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Loads the collection; absent or unreadable data yields an empty one.
    pub fn load(&self) -> Vec<Task> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored tasks under '{}'", self.key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Error reading stored tasks: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                debug!("Loaded {} tasks", tasks.len());
                tasks
            }
            Err(e) => {
                warn!("Error loading tasks, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Serializes and writes the full collection.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let raw = serde_json::to_string(tasks)?;
        self.store.set(&self.key, &raw)
    }
}
