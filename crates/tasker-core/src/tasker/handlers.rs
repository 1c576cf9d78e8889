//! Handler operations that return display wrapper types.
//!
//! These are what the CLI and the MCP server call: they resolve ids, run the
//! underlying operation and package the outcome for rendering. Lookups that
//! miss come back as `None` so each interface can word the no-op itself.

use super::Tasker;
use crate::{
    display::{Categories, CreateResult, DeleteResult, Tasks, UpdateResult},
    error::{Result, TaskError},
    models::{Task, UpdateTaskRequest},
    params::{CreateTask, DeleteTask, Id, ListTasks, UpdateTask},
};

impl Tasker {
    /// Creates a task and waits for its enrichment to settle.
    ///
    /// The result shows the task with suggested metadata when the suggestion
    /// succeeded, and with fallback metadata otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tasker_core::{params::CreateTask, TaskerBuilder};
    /// # async fn example() -> Result<(), tasker_core::TaskError> {
    /// let tasker = TaskerBuilder::new().in_memory().build().await?;
    /// let result = tasker
    ///     .create_task_result(&CreateTask {
    ///         title: "Water plants".to_string(),
    ///         due: Some("2030-01-15".to_string()),
    ///     })
    ///     .await?;
    /// assert_eq!(result.resource.priority.as_str(), "medium");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_task_result(&self, params: &CreateTask) -> Result<CreateResult<Task>> {
        let pending = self.create_task(params).await?;
        let inserted = pending.task.clone();
        let task = pending.settle().await?.into_task().unwrap_or(inserted);
        Ok(CreateResult::new(task))
    }

    /// Lists tasks through the filtered, sorted view.
    pub async fn list_tasks_result(&self, params: &ListTasks) -> Result<Tasks> {
        Ok(Tasks(self.list_tasks(params).await?))
    }

    /// Retrieves one task for display.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::TaskNotFound` when nothing matches the id.
    pub async fn show_task(&self, params: &Id) -> Result<Task> {
        self.get_task(params)
            .await?
            .ok_or_else(|| TaskError::not_found(&params.id))
    }

    /// Updates a task and reports the changes applied.
    pub async fn update_task_result(
        &self,
        params: UpdateTask,
    ) -> Result<Option<UpdateResult<Task>>> {
        let changes = UpdateTaskRequest::try_from(params.clone())?.changes();
        let task = self.update_task(params).await?;
        Ok(task.map(|task| UpdateResult::with_changes(task, changes)))
    }

    /// Flips completion and reports the new state.
    pub async fn toggle_task_result(&self, params: &Id) -> Result<Option<UpdateResult<Task>>> {
        let task = self.toggle_task(params).await?;
        Ok(task.map(|task| {
            let change = if task.completed {
                "Marked as completed"
            } else {
                "Marked as pending"
            };
            UpdateResult::with_changes(task, vec![change.to_string()])
        }))
    }

    /// Deletes a task once the caller has confirmed.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::InvalidInput` when `confirmed` is false.
    pub async fn delete_task_result(
        &self,
        params: &DeleteTask,
    ) -> Result<Option<DeleteResult<Task>>> {
        if !params.confirmed {
            return Err(TaskError::InvalidInput {
                field: "confirmed".to_string(),
                reason: "Task deletion requires explicit confirmation. Set 'confirmed' to true to proceed.".to_string(),
            });
        }

        let task = self
            .delete_task(&Id {
                id: params.id.clone(),
            })
            .await?;
        Ok(task.map(DeleteResult::new))
    }

    pub async fn categories_result(&self) -> Categories {
        Categories(self.categories().await)
    }
}
