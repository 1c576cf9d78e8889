//! Task operations for the Tasker.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::Mutex;

use super::{write_blocking, PendingTask, SuggestionOutcome, Tasker};
use crate::{
    error::{Result, TaskError},
    models::{NewTask, SortOption, Task, TaskFilter, TaskStats, UpdateTaskRequest},
    params::{CreateTask, Id, ListTasks, UpdateTask},
    store::TaskStore,
    suggest::{SuggestionClient, SuggestionError},
};

impl Tasker {
    /// Creates a task with fallback metadata and starts its enrichment.
    ///
    /// The returned [`PendingTask`] carries the task as inserted; the store
    /// already holds it when this returns.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::InvalidInput` for an empty title or a bad due date.
    pub async fn create_task(&self, params: &CreateTask) -> Result<PendingTask> {
        let new_task = NewTask::try_from(params)?;
        let task = write_blocking(&self.store, move |store| store.create(new_task)).await?;
        info!("Created task {} '{}'", task.id, task.title);

        let handle = tokio::spawn(enrich(
            Arc::clone(&self.store),
            Arc::clone(&self.suggestions),
            task.id.clone(),
            task.title.clone(),
        ));
        Ok(PendingTask { task, handle })
    }

    /// Retrieves a task by id or unique id prefix.
    pub async fn get_task(&self, params: &Id) -> Result<Option<Task>> {
        let store = self.store.lock().await;
        Ok(store.resolve(&params.id)?.cloned())
    }

    /// Filtered and sorted view of the collection.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::InvalidInput` for an unknown status or sort value.
    pub async fn list_tasks(&self, params: &ListTasks) -> Result<Vec<Task>> {
        let filter = TaskFilter::try_from(params)?;
        let sort = match &params.sort {
            Some(raw) => raw
                .parse::<SortOption>()
                .map_err(|e| TaskError::invalid_input("sort").with_reason(e))?,
            None => SortOption::default(),
        };

        let store = self.store.lock().await;
        Ok(store.view(&filter, sort).into_iter().cloned().collect())
    }

    /// Merges the given fields into a task.
    ///
    /// Returns `Ok(None)` when no task matches; nothing changes then.
    pub async fn update_task(&self, params: UpdateTask) -> Result<Option<Task>> {
        let id = params.id.clone();
        let request = UpdateTaskRequest::try_from(params)?;
        self.with_resolved(&id, move |store, id| {
            store.update(id, request)?;
            Ok(store.get(id).cloned())
        })
        .await
    }

    /// Flips a task's completion flag.
    pub async fn toggle_task(&self, params: &Id) -> Result<Option<Task>> {
        self.with_resolved(&params.id, |store, id| {
            store.toggle_completion(id);
            Ok(store.get(id).cloned())
        })
        .await
    }

    /// Deletes a task and returns it as it was.
    pub async fn delete_task(&self, params: &Id) -> Result<Option<Task>> {
        self.with_resolved(&params.id, |store, id| {
            let task = store.get(id).cloned();
            store.delete(id);
            Ok(task)
        })
        .await
    }

    pub async fn stats(&self) -> TaskStats {
        self.store.lock().await.stats()
    }

    /// "All" followed by every category in use.
    pub async fn categories(&self) -> Vec<String> {
        self.store.lock().await.categories()
    }

    /// Full id behind `id_or_prefix`, if any task matches.
    pub(crate) async fn resolve_id(&self, id_or_prefix: &str) -> Result<Option<String>> {
        let store = self.store.lock().await;
        Ok(store.resolve(id_or_prefix)?.map(|t| t.id.clone()))
    }

    /// Runs `op` with the full id behind `id_or_prefix`, or returns `None`
    /// when nothing matches. `op` runs on the blocking pool.
    pub(crate) async fn with_resolved<T, F>(&self, id_or_prefix: &str, op: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut TaskStore, &str) -> Result<Option<T>> + Send + 'static,
        T: Send + 'static,
    {
        let id_or_prefix = id_or_prefix.to_string();
        write_blocking(&self.store, move |store| {
            let Some(id) = store.resolve(&id_or_prefix)?.map(|t| t.id.clone()) else {
                debug!("No task matches '{id_or_prefix}'");
                return Ok(None);
            };
            op(store, &id)
        })
        .await
    }
}

/// Asks for a breakdown and applies it, holding the lock only to apply.
async fn enrich(
    store: Arc<Mutex<TaskStore>>,
    suggestions: Arc<dyn SuggestionClient>,
    id: String,
    title: String,
) -> Result<SuggestionOutcome> {
    let suggestion = match suggestions.suggest_task_breakdown(&title).await {
        Ok(suggestion) => Some(suggestion),
        Err(SuggestionError::Disabled) => {
            debug!("Suggestions disabled, keeping fallback");
            None
        }
        Err(e) => {
            warn!("Suggestion for task {id} failed, keeping fallback: {e}");
            None
        }
    };

    write_blocking(&store, move |store| {
        let Some(suggestion) = suggestion else {
            return Ok(store
                .get(&id)
                .cloned()
                .map_or(SuggestionOutcome::Discarded, SuggestionOutcome::Fallback));
        };
        if !store.apply_suggestion(&id, &suggestion) {
            info!("Task {id} was deleted before its suggestion arrived");
            return Ok(SuggestionOutcome::Discarded);
        }
        Ok(store
            .get(&id)
            .cloned()
            .map_or(SuggestionOutcome::Discarded, SuggestionOutcome::Enriched))
    })
    .await
}
