//! Sub-task operations for the Tasker.

use log::debug;

use super::Tasker;
use crate::{
    error::Result,
    models::{NewSubTask, SubTaskEdit, Task},
    params::{self, AddSubTask, EditSubTask, SubTaskRef},
    store::TaskStore,
    suggest::priority_or_default,
};

impl Tasker {
    /// Appends a sub-task to a task.
    ///
    /// Without an explicit priority the sub-task is medium, unless
    /// `suggest_priority` is set, in which case the suggestion client is asked
    /// (falling back to medium). Returns the updated parent, or `None` when
    /// no task matches; the client is not asked then.
    pub async fn add_sub_task(&self, params: &AddSubTask) -> Result<Option<Task>> {
        let mut new_sub_task = NewSubTask::new(params.text.clone())?;
        if let Some(due) = params.due.as_deref() {
            new_sub_task = new_sub_task.with_due_date(params::parse_due_date(due)?);
        }
        let explicit = params::parse_priority(params.priority.as_deref())?;

        let Some(task_id) = self.resolve_id(&params.task_id).await? else {
            debug!("No task matches '{}'", params.task_id);
            return Ok(None);
        };

        let priority = match explicit {
            Some(priority) => Some(priority),
            None if params.suggest_priority => {
                Some(priority_or_default(self.suggestions.as_ref(), &new_sub_task.text).await)
            }
            None => None,
        };
        if let Some(priority) = priority {
            new_sub_task = new_sub_task.with_priority(priority);
        }

        // The parent may have been deleted while the suggestion was pending.
        self.with_resolved(&task_id, move |store, id| {
            store.add_sub_task(id, new_sub_task)?;
            Ok(store.get(id).cloned())
        })
        .await
    }

    /// Flips one sub-task's completion. Returns the updated parent.
    pub async fn toggle_sub_task(&self, params: &SubTaskRef) -> Result<Option<Task>> {
        let sub_task_id = params.sub_task_id.clone();
        self.with_resolved(&params.task_id, move |store, id| {
            let Some(sub_id) = resolve_sub_task_id(store, id, &sub_task_id)? else {
                return Ok(None);
            };
            store.toggle_sub_task(id, &sub_id);
            Ok(store.get(id).cloned())
        })
        .await
    }

    /// Edits one sub-task's text, priority or due date.
    pub async fn edit_sub_task(&self, params: &EditSubTask) -> Result<Option<Task>> {
        let edit = SubTaskEdit::try_from(params)?;
        let sub_task_id = params.sub_task_id.clone();
        self.with_resolved(&params.task_id, move |store, id| {
            let Some(sub_id) = resolve_sub_task_id(store, id, &sub_task_id)? else {
                return Ok(None);
            };
            store.edit_sub_task(id, &sub_id, edit)?;
            Ok(store.get(id).cloned())
        })
        .await
    }

    /// Removes one sub-task. Returns the updated parent.
    pub async fn delete_sub_task(&self, params: &SubTaskRef) -> Result<Option<Task>> {
        let sub_task_id = params.sub_task_id.clone();
        self.with_resolved(&params.task_id, move |store, id| {
            let Some(sub_id) = resolve_sub_task_id(store, id, &sub_task_id)? else {
                return Ok(None);
            };
            store.delete_sub_task(id, &sub_id);
            Ok(store.get(id).cloned())
        })
        .await
    }
}

fn resolve_sub_task_id(
    store: &TaskStore,
    task_id: &str,
    sub_task_id: &str,
) -> Result<Option<String>> {
    let Some(task) = store.get(task_id) else {
        return Ok(None);
    };
    Ok(store
        .resolve_sub_task(task, sub_task_id)?
        .map(|st| st.id.clone()))
}
