//! Request types for creating and updating tasks.

use jiff::Timestamp;

use super::{Priority, SubTask};
use crate::{
    error::{Result, TaskError},
    params,
};

/// A validated request to create a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub due_date: Option<Timestamp>,
}

impl NewTask {
    /// Trims the title and rejects it when empty.
    pub fn new(title: impl Into<String>, due_date: Option<Timestamp>) -> Result<Self> {
        Ok(Self {
            title: required_text("title", title.into())?,
            due_date,
        })
    }
}

impl TryFrom<&params::CreateTask> for NewTask {
    type Error = TaskError;

    fn try_from(params: &params::CreateTask) -> Result<Self> {
        let due_date = params
            .due
            .as_deref()
            .map(params::parse_due_date)
            .transpose()?;
        NewTask::new(params.title.clone(), due_date)
    }
}

/// Partial update merged into an existing task.
///
/// Each `Some` field replaces the task's value. `sub_tasks` replaces the whole
/// sequence; there is no element-level patching.
#[derive(Debug, Default, Clone)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    /// An empty string clears the description
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    /// An empty string resets the category to "General"
    pub category: Option<String>,
    /// `Some(None)` clears the due date
    pub due_date: Option<Option<Timestamp>>,
    pub sub_tasks: Option<Vec<SubTask>>,
}

impl UpdateTaskRequest {
    /// Update that replaces only the sub-task sequence.
    pub fn sub_tasks(sub_tasks: Vec<SubTask>) -> Self {
        Self {
            sub_tasks: Some(sub_tasks),
            ..Default::default()
        }
    }

    /// Human-readable list of the fields this request touches.
    pub fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if self.title.is_some() {
            changes.push("Updated title".to_string());
        }
        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                changes.push("Cleared description".to_string());
            } else {
                changes.push("Updated description".to_string());
            }
        }
        if let Some(completed) = self.completed {
            changes.push(format!(
                "Marked as {}",
                if completed { "completed" } else { "pending" }
            ));
        }
        if let Some(priority) = self.priority {
            changes.push(format!("Set priority to {}", priority.as_str()));
        }
        if let Some(category) = &self.category {
            changes.push(format!("Set category to {}", category.trim()));
        }
        match self.due_date {
            Some(Some(_)) => changes.push("Updated due date".to_string()),
            Some(None) => changes.push("Cleared due date".to_string()),
            None => {}
        }
        if self.sub_tasks.is_some() {
            changes.push("Replaced sub-tasks".to_string());
        }
        changes
    }

    /// Rejects an empty title or empty sub-task text.
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            required_text("title", title.clone())?;
        }
        if let Some(sub_tasks) = &self.sub_tasks {
            for sub_task in sub_tasks {
                required_text("sub_tasks.text", sub_task.text.clone())?;
            }
        }
        Ok(())
    }
}

impl TryFrom<params::UpdateTask> for UpdateTaskRequest {
    type Error = TaskError;

    /// Convert update parameters into a validated request.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tasker_core::{models::{Priority, UpdateTaskRequest}, params::UpdateTask};
    ///
    /// let params = UpdateTask {
    ///     id: "abc".to_string(),
    ///     priority: Some("high".to_string()),
    ///     clear_due: true,
    ///     ..Default::default()
    /// };
    /// let request = UpdateTaskRequest::try_from(params)?;
    /// assert_eq!(request.priority, Some(Priority::High));
    /// assert_eq!(request.due_date, Some(None));
    /// # Ok::<(), tasker_core::TaskError>(())
    /// ```
    fn try_from(params: params::UpdateTask) -> Result<Self> {
        let priority = params::parse_priority(params.priority.as_deref())?;
        let due_date = params::parse_due_update(params.due.as_deref(), params.clear_due)?;

        let request = Self {
            title: params.title,
            description: params.description,
            completed: None,
            priority,
            category: params.category,
            due_date,
            sub_tasks: None,
        };
        request.validate()?;
        Ok(request)
    }
}

/// A sub-task to append to a task.
#[derive(Debug, Clone)]
pub struct NewSubTask {
    pub text: String,
    /// Defaults to medium when absent
    pub priority: Option<Priority>,
    pub due_date: Option<Timestamp>,
}

impl NewSubTask {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        Ok(Self {
            text: required_text("text", text.into())?,
            priority: None,
            due_date: None,
        })
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: Timestamp) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Edit of a single sub-task's fields.
#[derive(Debug, Default, Clone)]
pub struct SubTaskEdit {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    /// `Some(None)` clears the due date
    pub due_date: Option<Option<Timestamp>>,
}

impl TryFrom<&params::EditSubTask> for SubTaskEdit {
    type Error = TaskError;

    fn try_from(params: &params::EditSubTask) -> Result<Self> {
        let text = params
            .text
            .clone()
            .map(|t| required_text("text", t))
            .transpose()?;
        Ok(Self {
            text,
            priority: params::parse_priority(params.priority.as_deref())?,
            due_date: params::parse_due_update(params.due.as_deref(), params.clear_due)?,
        })
    }
}

pub(crate) fn required_text(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(trimmed.to_string())
}
