//! Task and sub-task model definitions.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{deadline::Deadline, Priority};

/// Category assigned when neither the user nor a suggestion supplies one.
pub const DEFAULT_CATEGORY: &str = "General";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// A user-tracked unit of work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, immutable identifier (UUID v4 string)
    pub id: String,

    /// Short title; never empty
    pub title: String,

    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Completion flag; toggling it never touches sub-tasks
    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub priority: Priority,

    /// Free-text label, "General" unless set
    #[serde(default = "default_category")]
    pub category: String,

    /// Creation instant
    #[serde(with = "super::millis")]
    pub created_at: Timestamp,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::millis::option"
    )]
    pub due_date: Option<Timestamp>,

    /// Ordered checklist owned by this task
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
}

/// A checklist item owned by exactly one [`Task`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    /// Identifier, unique within the parent task
    pub id: String,

    pub text: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::millis::option"
    )]
    pub due_date: Option<Timestamp>,
}

impl Task {
    /// Number of completed sub-tasks.
    pub fn completed_sub_tasks(&self) -> usize {
        self.sub_tasks.iter().filter(|st| st.completed).count()
    }

    /// Sub-task completion as a rounded percentage, 0 when there are none.
    pub fn progress_percent(&self) -> u8 {
        if self.sub_tasks.is_empty() {
            return 0;
        }
        let ratio = self.completed_sub_tasks() as f64 / self.sub_tasks.len() as f64;
        (ratio * 100.0).round() as u8
    }

    /// Deadline classification relative to `now`, if the task has a due date.
    pub fn deadline(&self, now: Timestamp) -> Option<Deadline> {
        self.due_date
            .map(|due| Deadline::classify(due, self.completed, now))
    }

    /// Looks up a sub-task by id.
    pub fn sub_task(&self, sub_task_id: &str) -> Option<&SubTask> {
        self.sub_tasks.iter().find(|st| st.id == sub_task_id)
    }
}

impl SubTask {
    /// Deadline classification relative to `now`, if the sub-task has a due
    /// date.
    pub fn deadline(&self, now: Timestamp) -> Option<Deadline> {
        self.due_date
            .map(|due| Deadline::classify(due, self.completed, now))
    }
}
