//! Task-level mutations.

use jiff::Timestamp;
use log::debug;
use uuid::Uuid;

use super::TaskStore;
use crate::{
    error::Result,
    models::{
        requests::required_text, NewTask, SubTask, Task, UpdateTaskRequest, DEFAULT_CATEGORY,
    },
    suggest::TaskSuggestion,
};

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn category_or_default(category: &str) -> String {
    let category = category.trim();
    if category.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        category.to_string()
    }
}

impl TaskStore {
    /// Inserts a task with fallback metadata at the front of the collection.
    ///
    /// The returned task is immediately usable; suggested metadata, if any,
    /// arrives later through [`TaskStore::apply_suggestion`].
    ///
    /// # Errors
    ///
    /// Returns `TaskError::InvalidInput` when the title is blank.
    pub fn create(&mut self, new_task: NewTask) -> Result<Task> {
        let title = required_text("title", new_task.title)?;
        let fallback = TaskSuggestion::fallback();
        let task = Task {
            id: new_id(),
            title,
            description: None,
            completed: false,
            priority: fallback.priority,
            category: fallback.category,
            created_at: self.next_created_at(),
            due_date: new_task.due_date,
            sub_tasks: Vec::new(),
        };

        debug!("Created task {} '{}'", task.id, task.title);
        self.tasks.insert(0, task.clone());
        self.sync();
        Ok(task)
    }

    /// Merges the request into the task with the given id.
    ///
    /// Returns `Ok(false)` when no task matched.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::InvalidInput` for an empty title or sub-task text.
    pub fn update(&mut self, id: &str, request: UpdateTaskRequest) -> Result<bool> {
        request.validate()?;
        Ok(self.merge(id, request))
    }

    /// Flips the completion flag. Sub-tasks are left untouched.
    pub fn toggle_completion(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        debug!("Task {id} completed={}", task.completed);
        self.sync();
        true
    }

    /// Removes the task. Deleting an absent id changes nothing.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.tasks.remove(index);
        debug!("Deleted task {id}");
        self.sync();
        true
    }

    /// Replaces a task's metadata with a suggestion that arrived after
    /// creation. Returns `false` when the task no longer exists.
    pub fn apply_suggestion(&mut self, id: &str, suggestion: &TaskSuggestion) -> bool {
        let Some(index) = self.position(id) else {
            debug!("Discarding suggestion for missing task {id}");
            return false;
        };

        let task = &mut self.tasks[index];
        let description = suggestion.description.trim();
        task.description = (!description.is_empty()).then(|| description.to_string());
        task.priority = suggestion.priority;
        task.category = category_or_default(&suggestion.category);
        task.sub_tasks = suggestion
            .sub_tasks
            .iter()
            .map(|suggested| SubTask {
                id: new_id(),
                text: suggested.text.clone(),
                completed: false,
                priority: Some(suggested.priority),
                due_date: None,
            })
            .collect();

        debug!(
            "Applied suggestion to task {id}: {} sub-tasks",
            task.sub_tasks.len()
        );
        self.sync();
        true
    }

    /// Unvalidated merge shared by `update` and the sub-task operations that
    /// introduce no text.
    pub(crate) fn merge(&mut self, id: &str, request: UpdateTaskRequest) -> bool {
        let Some(index) = self.position(id) else {
            debug!("No task {id} to update");
            return false;
        };

        let task = &mut self.tasks[index];
        if let Some(title) = request.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = request.description {
            let description = description.trim();
            task.description = (!description.is_empty()).then(|| description.to_string());
        }
        if let Some(completed) = request.completed {
            task.completed = completed;
        }
        if let Some(priority) = request.priority {
            task.priority = priority;
        }
        if let Some(category) = request.category {
            task.category = category_or_default(&category);
        }
        if let Some(due_date) = request.due_date {
            task.due_date = due_date;
        }
        if let Some(sub_tasks) = request.sub_tasks {
            task.sub_tasks = sub_tasks;
        }

        self.sync();
        true
    }

    /// Creation time for a new task: now at millisecond precision, bumped so
    /// that it is strictly later than every existing task.
    fn next_created_at(&self) -> Timestamp {
        let now_ms = Timestamp::now().as_millisecond();
        let latest_ms = self
            .tasks
            .iter()
            .map(|t| t.created_at.as_millisecond())
            .max();
        let millis = match latest_ms {
            Some(latest) if latest >= now_ms => latest + 1,
            _ => now_ms,
        };
        Timestamp::from_millisecond(millis).unwrap_or_else(|_| Timestamp::now())
    }
}
