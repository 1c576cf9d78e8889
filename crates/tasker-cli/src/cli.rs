//! Command handlers for the terminal interface.
//!
//! Each handler turns parsed arguments into core parameters, runs the
//! operation on the [`Tasker`] facade and renders the markdown it returns.
//! An id that matches nothing is reported, not treated as a failure: the
//! collection is left as it was and the command still exits successfully.

use anyhow::{Context, Result};
use log::debug;
use tasker_core::{
    display::OperationStatus,
    params::{Id, ListTasks, SubTaskRef},
    Tasker,
};

use crate::{
    args::{
        AddSubTaskArgs, AddTaskArgs, DeleteTaskArgs, EditSubTaskArgs, EditTaskArgs,
        ListTasksArgs, SubTaskCommands, SubTaskRefArgs, TaskIdArgs,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    tasker: Tasker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tasker: Tasker, renderer: TerminalRenderer) -> Self {
        Self { tasker, renderer }
    }

    pub async fn add_task(&self, args: AddTaskArgs) -> Result<()> {
        let result = self
            .tasker
            .create_task_result(&args.into())
            .await
            .context("Failed to add task")?;
        self.renderer.render(&result.to_string())
    }

    pub async fn list_tasks(&self, args: ListTasksArgs) -> Result<()> {
        let params: ListTasks = args.into();
        debug!("list: {params:?}");
        let tasks = self
            .tasker
            .list_tasks_result(&params)
            .await
            .context("Failed to list tasks")?;
        self.renderer.render(&tasks.to_string())
    }

    pub async fn show_task(&self, args: TaskIdArgs) -> Result<()> {
        let id: Id = args.into();
        let task = self
            .tasker
            .show_task(&id)
            .await
            .with_context(|| format!("Failed to show task '{}'", id.id))?;
        self.renderer.render(&task.to_string())
    }

    pub async fn edit_task(&self, args: EditTaskArgs) -> Result<()> {
        let id = args.id.clone();
        match self
            .tasker
            .update_task_result(args.into())
            .await
            .context("Failed to edit task")?
        {
            Some(result) => self.renderer.render(&result.to_string()),
            None => self.no_match(&id),
        }
    }

    pub async fn toggle_task(&self, args: TaskIdArgs) -> Result<()> {
        let id: Id = args.into();
        match self
            .tasker
            .toggle_task_result(&id)
            .await
            .context("Failed to toggle task")?
        {
            Some(result) => self.renderer.render(&result.to_string()),
            None => self.no_match(&id.id),
        }
    }

    pub async fn delete_task(&self, args: DeleteTaskArgs) -> Result<()> {
        let id = args.id.clone();
        match self
            .tasker
            .delete_task_result(&args.into())
            .await
            .context("Failed to delete task")?
        {
            Some(result) => self.renderer.render(&result.to_string()),
            None => self.no_match(&id),
        }
    }

    pub async fn stats(&self) -> Result<()> {
        let stats = self.tasker.stats().await;
        self.renderer.render(&stats.to_string())
    }

    pub async fn categories(&self) -> Result<()> {
        let categories = self.tasker.categories_result().await;
        self.renderer.render(&categories.to_string())
    }

    pub async fn handle_sub_task_command(&self, command: SubTaskCommands) -> Result<()> {
        match command {
            SubTaskCommands::Add(args) => self.add_sub_task(args).await,
            SubTaskCommands::Toggle(args) => self.toggle_sub_task(args).await,
            SubTaskCommands::Edit(args) => self.edit_sub_task(args).await,
            SubTaskCommands::Delete(args) => self.delete_sub_task(args).await,
        }
    }

    async fn add_sub_task(&self, args: AddSubTaskArgs) -> Result<()> {
        let task_id = args.task_id.clone();
        let task = self
            .tasker
            .add_sub_task(&args.into())
            .await
            .context("Failed to add sub-task")?;
        self.render_task_or_no_match(task, &task_id)
    }

    async fn toggle_sub_task(&self, args: SubTaskRefArgs) -> Result<()> {
        let params: SubTaskRef = args.into();
        let task = self
            .tasker
            .toggle_sub_task(&params)
            .await
            .context("Failed to toggle sub-task")?;
        self.render_task_or_no_match(task, &params.sub_task_id)
    }

    async fn edit_sub_task(&self, args: EditSubTaskArgs) -> Result<()> {
        let sub_task_id = args.sub_task_id.clone();
        let task = self
            .tasker
            .edit_sub_task(&args.into())
            .await
            .context("Failed to edit sub-task")?;
        self.render_task_or_no_match(task, &sub_task_id)
    }

    async fn delete_sub_task(&self, args: SubTaskRefArgs) -> Result<()> {
        let params: SubTaskRef = args.into();
        let task = self
            .tasker
            .delete_sub_task(&params)
            .await
            .context("Failed to delete sub-task")?;
        self.render_task_or_no_match(task, &params.sub_task_id)
    }

    fn render_task_or_no_match(&self, task: Option<tasker_core::Task>, id: &str) -> Result<()> {
        match task {
            Some(task) => self.renderer.render(&task.to_string()),
            None => self.no_match(id),
        }
    }

    fn no_match(&self, id: &str) -> Result<()> {
        self.renderer.render(&OperationStatus::no_match(id).to_string())
    }
}
