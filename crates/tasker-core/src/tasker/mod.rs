//! High-level async API over the task store.
//!
//! [`Tasker`] is what the CLI and the MCP server talk to. It owns the single
//! [`TaskStore`] behind an async mutex together with the suggestion client,
//! and turns interface parameters (raw strings, id prefixes) into store
//! operations. Mutations save through SQLite, so they run on the blocking
//! pool with the lock held; reads stay on the runtime.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │   TaskStore     │
//! │  (display       │───▶│ (task_ops,      │───▶│ + repository    │
//! │   wrappers)     │    │  sub_task_ops)  │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                 │
//!                                 ▼
//!                        ┌─────────────────┐
//!                        │ SuggestionClient│
//!                        └─────────────────┘
//! ```
//!
//! # Creation and enrichment
//!
//! [`Tasker::create_task`] inserts the task with fallback metadata and
//! returns at once with a [`PendingTask`]. A spawned tokio task asks the
//! suggestion client for a breakdown without holding the store lock, then
//! re-locks and applies the suggestion by id. If the task was deleted in the
//! meantime the suggestion is dropped. [`PendingTask::settle`] waits for that
//! to finish and reports what happened.
//!
//! ```rust
//! use tasker_core::{params::CreateTask, SuggestionOutcome, TaskerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tasker = TaskerBuilder::new().in_memory().build().await?;
//!
//! let pending = tasker
//!     .create_task(&CreateTask {
//!         title: "Buy milk".to_string(),
//!         due: None,
//!     })
//!     .await?;
//! assert_eq!(pending.task.category, "General");
//!
//! // No suggestion client configured: the fallback metadata stays.
//! assert!(matches!(pending.settle().await?, SuggestionOutcome::Fallback(_)));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::{
    sync::Mutex,
    task::{self, JoinHandle},
};

use crate::{
    error::{Result, TaskError},
    models::Task,
    store::TaskStore,
    suggest::SuggestionClient,
};

pub mod builder;
pub mod handlers;
pub mod sub_task_ops;
pub mod task_ops;


pub use builder::TaskerBuilder;

/// Shared handle to the task collection and the suggestion client.
#[derive(Clone)]
pub struct Tasker {
    pub(crate) store: Arc<Mutex<TaskStore>>,
    pub(crate) suggestions: Arc<dyn SuggestionClient>,
}

impl Tasker {
    /// Wraps an already loaded store.
    pub fn new(store: TaskStore, suggestions: Arc<dyn SuggestionClient>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            suggestions,
        }
    }
}

/// How the enrichment of a newly created task ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionOutcome {
    /// Suggested metadata was applied
    Enriched(Task),
    /// The suggestion failed; the task keeps its fallback metadata
    Fallback(Task),
    /// The task was deleted before the suggestion arrived
    Discarded,
}

impl SuggestionOutcome {
    /// The task as it stands after enrichment, if it still exists.
    pub fn into_task(self) -> Option<Task> {
        match self {
            SuggestionOutcome::Enriched(task) | SuggestionOutcome::Fallback(task) => Some(task),
            SuggestionOutcome::Discarded => None,
        }
    }
}

/// A freshly created task whose enrichment may still be in flight.
pub struct PendingTask {
    /// The task as inserted, with fallback metadata
    pub task: Task,
    handle: JoinHandle<Result<SuggestionOutcome>>,
}

impl PendingTask {
    pub fn id(&self) -> &str {
        &self.task.id
    }

    /// True once the enrichment has finished.
    pub fn is_settled(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the enrichment to finish.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::Configuration` if the enrichment task panicked or
    /// was cancelled.
    pub async fn settle(self) -> Result<SuggestionOutcome> {
        self.handle.await.map_err(|e| TaskError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

/// Runs `op` on the blocking pool, holding the store lock until it returns.
///
/// Every save happens inside `op`, off the runtime threads, and in the order
/// the lock was taken.
pub(crate) async fn write_blocking<T, F>(store: &Arc<Mutex<TaskStore>>, op: F) -> Result<T>
where
    F: FnOnce(&mut TaskStore) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let mut store = Arc::clone(store).lock_owned().await;
    task::spawn_blocking(move || op(&mut store))
        .await
        .map_err(|e| TaskError::Configuration {
            message: format!("Task join error: {e}"),
        })?
}
