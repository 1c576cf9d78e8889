//! Command-line argument definitions using clap.
//!
//! The structs here only describe what the terminal accepts. Each one
//! converts into the interface-neutral parameter type from
//! `tasker_core::params`, so validation of titles, dates and priorities
//! happens once in the core for both the CLI and the MCP server:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Task Store
//! ```

use std::{fmt, path::PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use tasker_core::params::*;

/// AI-assisted to-do list
///
/// Tasks are kept in a local SQLite database. When a Gemini API key is
/// available, every new task is enriched in the background with a
/// description, prioritized sub-tasks, a priority and a category.
#[derive(Parser)]
#[command(version, about, name = "tk")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/tasker/tasker.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Never contact the suggestion service
    #[arg(long, global = true)]
    pub offline: bool,

    /// Gemini API key used for task suggestions
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model used for task suggestions
    #[arg(long, global = true, env = "TASKER_MODEL")]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task and let the assistant break it down
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// List tasks
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Show a task with its sub-tasks
    #[command(alias = "s")]
    Show(TaskIdArgs),
    /// Change a task's title, description, priority, category or due date
    #[command(alias = "e")]
    Edit(EditTaskArgs),
    /// Flip a task between pending and completed
    #[command(alias = "t")]
    Toggle(TaskIdArgs),
    /// Delete a task permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteTaskArgs),
    /// Show task statistics
    Stats,
    /// List the categories in use
    Categories,
    /// Manage the sub-tasks of a task
    Sub {
        #[command(subcommand)]
        command: SubTaskCommands,
    },
    /// Start the MCP server
    Serve,
}

#[derive(ClapArgs)]
pub struct AddTaskArgs {
    /// Title of the task
    pub title: String,
    /// Due date as YYYY-MM-DD or an RFC 3339 timestamp
    #[arg(long)]
    pub due: Option<String>,
}

impl From<AddTaskArgs> for CreateTask {
    fn from(val: AddTaskArgs) -> Self {
        CreateTask {
            title: val.title,
            due: val.due,
        }
    }
}

/// Filter and order the task list
///
/// Filters combine: a task is listed only when it matches the status, the
/// search text and the category at the same time.
#[derive(ClapArgs, Default)]
pub struct ListTasksArgs {
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    /// Case-insensitive text matched against title and description
    #[arg(long)]
    pub search: Option<String>,
    /// Only tasks in this category
    #[arg(short, long)]
    pub category: Option<String>,
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,
}

impl From<ListTasksArgs> for ListTasks {
    fn from(val: ListTasksArgs) -> Self {
        ListTasks {
            status: val.status.map(|s| s.to_string()),
            search: val.search,
            category: val.category,
            sort: val.sort.map(|s| s.to_string()),
        }
    }
}

#[derive(ClapArgs)]
pub struct TaskIdArgs {
    #[arg(help = "Task id, or any unique prefix of it")]
    pub id: String,
}

impl From<TaskIdArgs> for Id {
    fn from(val: TaskIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit a task
///
/// Only the given fields change. An empty description clears it.
#[derive(ClapArgs)]
pub struct EditTaskArgs {
    #[arg(help = "Task id, or any unique prefix of it")]
    pub id: String,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,
    #[arg(short, long)]
    pub category: Option<String>,
    /// New due date as YYYY-MM-DD or an RFC 3339 timestamp
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<String>,
    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,
}

impl From<EditTaskArgs> for UpdateTask {
    fn from(val: EditTaskArgs) -> Self {
        UpdateTask {
            id: val.id,
            title: val.title,
            description: val.description,
            priority: val.priority.map(|p| p.to_string()),
            category: val.category,
            due: val.due,
            clear_due: val.clear_due,
        }
    }
}

#[derive(ClapArgs)]
pub struct DeleteTaskArgs {
    #[arg(help = "Task id, or any unique prefix of it")]
    pub id: String,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteTaskArgs> for DeleteTask {
    fn from(val: DeleteTaskArgs) -> Self {
        DeleteTask {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum SubTaskCommands {
    /// Append a sub-task to a task
    #[command(alias = "a")]
    Add(AddSubTaskArgs),
    /// Flip a sub-task between pending and completed
    #[command(alias = "t")]
    Toggle(SubTaskRefArgs),
    /// Change a sub-task's text, priority or due date
    #[command(alias = "e")]
    Edit(EditSubTaskArgs),
    /// Remove a sub-task
    #[command(aliases = ["d", "rm"])]
    Delete(SubTaskRefArgs),
}

#[derive(ClapArgs)]
pub struct AddSubTaskArgs {
    #[arg(help = "Parent task id, or any unique prefix of it")]
    pub task_id: String,
    pub text: String,
    #[arg(short, long, value_enum, conflicts_with = "suggest_priority")]
    pub priority: Option<PriorityArg>,
    /// Due date as YYYY-MM-DD or an RFC 3339 timestamp
    #[arg(long)]
    pub due: Option<String>,
    /// Ask the assistant to pick the priority
    #[arg(long)]
    pub suggest_priority: bool,
}

impl From<AddSubTaskArgs> for AddSubTask {
    fn from(val: AddSubTaskArgs) -> Self {
        AddSubTask {
            task_id: val.task_id,
            text: val.text,
            priority: val.priority.map(|p| p.to_string()),
            due: val.due,
            suggest_priority: val.suggest_priority,
        }
    }
}

#[derive(ClapArgs)]
pub struct SubTaskRefArgs {
    #[arg(help = "Parent task id, or any unique prefix of it")]
    pub task_id: String,
    #[arg(help = "Sub-task id, or any unique prefix of it")]
    pub sub_task_id: String,
}

impl From<SubTaskRefArgs> for SubTaskRef {
    fn from(val: SubTaskRefArgs) -> Self {
        SubTaskRef {
            task_id: val.task_id,
            sub_task_id: val.sub_task_id,
        }
    }
}

#[derive(ClapArgs)]
pub struct EditSubTaskArgs {
    #[arg(help = "Parent task id, or any unique prefix of it")]
    pub task_id: String,
    #[arg(help = "Sub-task id, or any unique prefix of it")]
    pub sub_task_id: String,
    #[arg(short, long)]
    pub text: Option<String>,
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<String>,
    #[arg(long)]
    pub clear_due: bool,
}

impl From<EditSubTaskArgs> for EditSubTask {
    fn from(val: EditSubTaskArgs) -> Self {
        EditSubTask {
            task_id: val.task_id,
            sub_task_id: val.sub_task_id,
            text: val.text,
            priority: val.priority.map(|p| p.to_string()),
            due: val.due,
            clear_due: val.clear_due,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl fmt::Display for PriorityArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityArg::Low => write!(f, "low"),
            PriorityArg::Medium => write!(f, "medium"),
            PriorityArg::High => write!(f, "high"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    All,
    Pending,
    Completed,
}

impl fmt::Display for StatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusArg::All => write!(f, "all"),
            StatusArg::Pending => write!(f, "pending"),
            StatusArg::Completed => write!(f, "completed"),
        }
    }
}

/// Command-line names for the list orderings.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Newest first
    Created,
    /// Soonest due first, undated last
    Due,
    /// High, then medium, then low
    Priority,
}

impl fmt::Display for SortArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortArg::Created => write!(f, "createdAt"),
            SortArg::Due => write!(f, "dueDate"),
            SortArg::Priority => write!(f, "priority"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_args_convert_to_core_names() {
        let params: ListTasks = ListTasksArgs {
            status: Some(StatusArg::Pending),
            sort: Some(SortArg::Due),
            ..Default::default()
        }
        .into();
        assert_eq!(params.status.as_deref(), Some("pending"));
        assert_eq!(params.sort.as_deref(), Some("dueDate"));
        assert!(params.category.is_none());
    }

    #[test]
    fn test_delete_args_carry_confirmation() {
        let params: DeleteTask = DeleteTaskArgs {
            id: "ab12".to_string(),
            confirm: true,
        }
        .into();
        assert!(params.confirmed);
        assert_eq!(params.id, "ab12");
    }

    #[test]
    fn test_args_parse_global_flags_after_command() {
        let args = Args::try_parse_from([
            "tk",
            "list",
            "--status",
            "completed",
            "--offline",
            "--no-color",
        ])
        .unwrap();
        assert!(args.offline);
        assert!(args.no_color);
        assert!(matches!(
            args.command,
            Some(Commands::List(ListTasksArgs {
                status: Some(StatusArg::Completed),
                ..
            }))
        ));
    }
}
