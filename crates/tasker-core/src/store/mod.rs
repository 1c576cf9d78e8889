//! The task collection and its single writer.
//!
//! [`TaskStore`] owns the in-memory collection, applies every mutation to it
//! and then writes the full collection through a [`TaskRepository`]. Writes
//! are optimistic: a failed save is logged and the in-memory mutation stays.
//!
//! Mutations report absence instead of failing. `update`, `toggle_completion`
//! and `delete` return `false` when no task has the given id; only input
//! validation produces errors.
//!
//! - [`task_ops`]: task-level mutations and suggestion application
//! - [`sub_task_ops`]: sub-task edits, each a whole-array replacement

use log::{debug, error};

use crate::{
    derivation,
    error::{Result, TaskError},
    models::{SortOption, SubTask, Task, TaskFilter, TaskStats},
    storage::{MemoryStore, TaskRepository},
};

pub mod sub_task_ops;
pub mod task_ops;

#[cfg(test)]
mod tests;

/// Ordered task collection, most recently created first.
pub struct TaskStore {
    pub(crate) tasks: Vec<Task>,
    repository: TaskRepository,
}

impl TaskStore {
    /// Creates a store holding whatever the repository loads.
    pub fn new(repository: TaskRepository) -> Self {
        let tasks = repository.load();
        Self { tasks, repository }
    }

    /// Store backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(TaskRepository::new(MemoryStore::new()))
    }

    /// The raw collection in insertion order (newest first).
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Looks a task up by full id or unique id prefix.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::InvalidInput` when the prefix matches more than
    /// one task.
    pub fn resolve(&self, id_or_prefix: &str) -> Result<Option<&Task>> {
        unique_prefix(&self.tasks, id_or_prefix, |t| &t.id)
    }

    /// Looks a sub-task up by full id or unique id prefix within a task.
    pub fn resolve_sub_task<'a>(
        &self,
        task: &'a Task,
        id_or_prefix: &str,
    ) -> Result<Option<&'a SubTask>> {
        unique_prefix(&task.sub_tasks, id_or_prefix, |st| &st.id)
    }

    pub fn stats(&self) -> TaskStats {
        derivation::stats(&self.tasks)
    }

    pub fn categories(&self) -> Vec<String> {
        derivation::categories(&self.tasks)
    }

    /// Filtered and sorted view of the collection.
    pub fn view(&self, filter: &TaskFilter, sort: SortOption) -> Vec<&Task> {
        derivation::view(&self.tasks, filter, sort)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Writes the full collection; failures only get logged.
    fn sync(&self) {
        match self.repository.save(&self.tasks) {
            Ok(()) => debug!("Saved {} tasks", self.tasks.len()),
            Err(e) => error!("Error saving tasks: {e}"),
        }
    }
}

fn unique_prefix<'a, T>(
    items: &'a [T],
    id_or_prefix: &str,
    id_of: impl Fn(&T) -> &String,
) -> Result<Option<&'a T>> {
    let needle = id_or_prefix.trim();
    if needle.is_empty() {
        return Ok(None);
    }
    if let Some(exact) = items.iter().find(|item| id_of(item) == needle) {
        return Ok(Some(exact));
    }

    let mut matches = items.iter().filter(|item| id_of(item).starts_with(needle));
    match (matches.next(), matches.next()) {
        (None, _) => Ok(None),
        (Some(found), None) => Ok(Some(found)),
        (Some(_), Some(_)) => Err(TaskError::invalid_input("id")
            .with_reason(format!("'{needle}' matches more than one item"))),
    }
}
