//! Builder for creating and configuring Tasker instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::info;
use tokio::task;

use super::Tasker;
use crate::{
    error::{Result, TaskError},
    storage::{SqliteStore, TaskRepository},
    store::TaskStore,
    suggest::{OfflineSuggestions, SuggestionClient},
};

/// Builder for creating and configuring Tasker instances.
#[derive(Clone)]
pub struct TaskerBuilder {
    database_path: Option<PathBuf>,
    in_memory: bool,
    suggestions: Option<Arc<dyn SuggestionClient>>,
}

impl TaskerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            in_memory: false,
            suggestions: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/tasker/tasker.db` or `~/.local/share/tasker/tasker.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Keeps the collection in a private in-memory database; nothing
    /// survives the process.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Sets the client used to enrich new tasks. Defaults to
    /// [`OfflineSuggestions`].
    pub fn with_suggestion_client(mut self, client: Arc<dyn SuggestionClient>) -> Self {
        self.suggestions = Some(client);
        self
    }

    /// Opens the store, loads the collection and builds the tasker.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::XdgDirectory` if no default path can be derived
    /// Returns `TaskError::FileSystem` if the database directory cannot be
    /// created
    /// Returns `TaskError::Database` if the database cannot be opened
    pub async fn build(self) -> Result<Tasker> {
        let suggestions = self
            .suggestions
            .unwrap_or_else(|| Arc::new(OfflineSuggestions));

        let db_path = if self.in_memory {
            None
        } else if let Some(path) = self.database_path {
            Some(path)
        } else {
            Some(Self::default_database_path()?)
        };

        if let Some(parent) = db_path.as_deref().and_then(Path::parent) {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| TaskError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let store = task::spawn_blocking(move || {
            let kv = match &db_path {
                Some(path) => {
                    info!("Opening task database at {}", path.display());
                    SqliteStore::open(path)?
                }
                None => SqliteStore::open_in_memory()?,
            };
            Ok::<TaskStore, TaskError>(TaskStore::new(TaskRepository::new(kv)))
        })
        .await
        .map_err(|e| TaskError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Tasker::new(store, suggestions))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tasker")
            .place_data_file("tasker.db")
            .map_err(|e| TaskError::XdgDirectory(e.to_string()))
    }
}

impl Default for TaskerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
