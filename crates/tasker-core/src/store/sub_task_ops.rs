//! Sub-task operations.
//!
//! Each operation reads the parent's sub-task sequence, derives a new one and
//! writes it back as a whole through the task update path. Absent tasks or
//! sub-tasks make the operation a no-op. Blank texts are rejected here too,
//! whatever built the request.

use super::{task_ops::new_id, TaskStore};
use crate::{
    error::Result,
    models::{
        requests::required_text, NewSubTask, Priority, SubTask, SubTaskEdit, UpdateTaskRequest,
    },
};

impl TaskStore {
    /// Appends a sub-task, medium priority unless one is given.
    ///
    /// Returns the new sub-task, or `None` when the parent does not exist.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::InvalidInput` when the text is blank.
    pub fn add_sub_task(
        &mut self,
        task_id: &str,
        new_sub_task: NewSubTask,
    ) -> Result<Option<SubTask>> {
        let text = required_text("text", new_sub_task.text)?;
        let Some(task) = self.get(task_id) else {
            return Ok(None);
        };
        let mut sub_tasks = task.sub_tasks.clone();
        let sub_task = SubTask {
            id: new_id(),
            text,
            completed: false,
            priority: Some(new_sub_task.priority.unwrap_or(Priority::Medium)),
            due_date: new_sub_task.due_date,
        };
        sub_tasks.push(sub_task.clone());

        Ok(self
            .merge(task_id, UpdateTaskRequest::sub_tasks(sub_tasks))
            .then_some(sub_task))
    }

    /// Flips one sub-task's completion. The parent's flag is not touched.
    pub fn toggle_sub_task(&mut self, task_id: &str, sub_task_id: &str) -> bool {
        self.replace_sub_tasks(task_id, sub_task_id, |sub_tasks, index| {
            sub_tasks[index].completed = !sub_tasks[index].completed;
        })
    }

    /// Applies the edit's `Some` fields to one sub-task.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::InvalidInput` when the new text is blank.
    pub fn edit_sub_task(
        &mut self,
        task_id: &str,
        sub_task_id: &str,
        edit: SubTaskEdit,
    ) -> Result<bool> {
        let text = edit
            .text
            .map(|text| required_text("text", text))
            .transpose()?;
        Ok(self.replace_sub_tasks(task_id, sub_task_id, |sub_tasks, index| {
            let sub_task = &mut sub_tasks[index];
            if let Some(text) = text {
                sub_task.text = text;
            }
            if let Some(priority) = edit.priority {
                sub_task.priority = Some(priority);
            }
            if let Some(due_date) = edit.due_date {
                sub_task.due_date = due_date;
            }
        }))
    }

    pub fn delete_sub_task(&mut self, task_id: &str, sub_task_id: &str) -> bool {
        self.replace_sub_tasks(task_id, sub_task_id, |sub_tasks, index| {
            sub_tasks.remove(index);
        })
    }

    fn replace_sub_tasks(
        &mut self,
        task_id: &str,
        sub_task_id: &str,
        change: impl FnOnce(&mut Vec<SubTask>, usize),
    ) -> bool {
        let Some(task) = self.get(task_id) else {
            return false;
        };
        let Some(index) = task.sub_tasks.iter().position(|st| st.id == sub_task_id) else {
            return false;
        };

        let mut sub_tasks = task.sub_tasks.clone();
        change(&mut sub_tasks, index);
        self.merge(task_id, UpdateTaskRequest::sub_tasks(sub_tasks))
    }
}
