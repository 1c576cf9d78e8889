//! MCP server implementation for Tasker
//!
//! Exposes the task list to AI assistants over the Model Context Protocol.
//! Every tool returns the same markdown the terminal shows.

use std::future::Future;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tasker_core::Tasker;
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddSubTask, CreateTask, DeleteTask, EditSubTask, Id, ListTasks, McpResult, SubTaskRef,
    UpdateTask,
};

/// MCP server for Tasker
#[derive(Clone)]
pub struct TaskerMcpServer {
    tasker: Tasker,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TaskerMcpServer {
    pub fn new(tasker: Tasker) -> Self {
        Self {
            tasker,
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.tasker.clone())
    }

    #[tool(
        name = "create_task",
        description = "Create a new task from a title (required) and an optional due date (YYYY-MM-DD or RFC 3339). When the suggestion service is configured, the task is enriched with a description, prioritized sub-tasks, a priority and a category before this returns; otherwise it keeps medium priority and the General category. Returns the task with its ID."
    )]
    async fn create_task(&self, params: Parameters<CreateTask>) -> McpResult {
        self.handlers().create_task(params).await
    }

    #[tool(
        name = "list_tasks",
        description = "List tasks. All filters are optional and combine: status ('all', 'pending', 'completed'), search (case-insensitive text in title or description), category (exact name, 'All' for every category). Sort by 'createdAt' (newest first, default), 'dueDate' (soonest first, undated last) or 'priority' (high first)."
    )]
    async fn list_tasks(&self, params: Parameters<ListTasks>) -> McpResult {
        self.handlers().list_tasks(params).await
    }

    #[tool(
        name = "show_task",
        description = "Show one task with its description, priority, category, due date, deadline warnings and sub-tasks. The id may be any unique prefix of the task ID."
    )]
    async fn show_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(
        name = "update_task",
        description = "Change a task's title, description (empty string clears it), priority ('low', 'medium', 'high'), category or due date. Set clear_due=true to remove the due date. Only the given fields change. An unknown id changes nothing."
    )]
    async fn update_task(&self, params: Parameters<UpdateTask>) -> McpResult {
        self.handlers().update_task(params).await
    }

    #[tool(
        name = "toggle_task",
        description = "Flip a task between pending and completed. Sub-tasks are not affected."
    )]
    async fn toggle_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().toggle_task(params).await
    }

    #[tool(
        name = "delete_task",
        description = "Permanently delete a task and its sub-tasks. Requires confirmed=true. This operation cannot be undone."
    )]
    async fn delete_task(&self, params: Parameters<DeleteTask>) -> McpResult {
        self.handlers().delete_task(params).await
    }

    #[tool(
        name = "task_stats",
        description = "Count all tasks, completed tasks, pending tasks and pending high-priority tasks."
    )]
    async fn task_stats(&self) -> McpResult {
        self.handlers().task_stats().await
    }

    #[tool(
        name = "list_categories",
        description = "List the categories in use, starting with 'All'. Use one of these names as the category filter of list_tasks."
    )]
    async fn list_categories(&self) -> McpResult {
        self.handlers().list_categories().await
    }

    #[tool(
        name = "add_sub_task",
        description = "Append a sub-task to a task. Priority defaults to medium; set suggest_priority=true to let the suggestion service pick one instead. Optional due date as YYYY-MM-DD."
    )]
    async fn add_sub_task(&self, params: Parameters<AddSubTask>) -> McpResult {
        self.handlers().add_sub_task(params).await
    }

    #[tool(
        name = "toggle_sub_task",
        description = "Flip one sub-task between pending and completed. The parent task's completion is not changed."
    )]
    async fn toggle_sub_task(&self, params: Parameters<SubTaskRef>) -> McpResult {
        self.handlers().toggle_sub_task(params).await
    }

    #[tool(
        name = "edit_sub_task",
        description = "Change a sub-task's text, priority or due date. Set clear_due=true to remove the due date."
    )]
    async fn edit_sub_task(&self, params: Parameters<EditSubTask>) -> McpResult {
        self.handlers().edit_sub_task(params).await
    }

    #[tool(name = "delete_sub_task", description = "Remove one sub-task from a task.")]
    async fn delete_sub_task(&self, params: Parameters<SubTaskRef>) -> McpResult {
        self.handlers().delete_sub_task(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TaskerMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tasker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Tasker is a to-do list. Each task has a title, an optional description, a priority (low/medium/high), a category, an optional due date and a list of sub-tasks.

## Workflow
1. Create tasks with `create_task`. A configured suggestion service fills in the description, sub-tasks, priority and category.
2. Review them with `list_tasks` (filters: status, search, category; sort: createdAt, dueDate, priority) or `show_task`.
3. Refine with `update_task` and the sub-task tools.
4. Mark progress with `toggle_task` and `toggle_sub_task`.

## Notes
- IDs may be abbreviated to any unique prefix, as shown in listings.
- Unknown IDs change nothing and are reported in the result text.
- `delete_task` requires confirmed=true.
- `task_stats` and `list_categories` give an overview of the whole list."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: TaskerMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Tasker MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tasker_core::TaskerBuilder;

    use super::*;

    #[tokio::test]
    async fn test_server_registers_all_tools() {
        let tasker = TaskerBuilder::new()
            .in_memory()
            .build()
            .await
            .expect("Failed to build tasker");
        let server = TaskerMcpServer::new(tasker);

        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "add_sub_task",
                "create_task",
                "delete_sub_task",
                "delete_task",
                "edit_sub_task",
                "list_categories",
                "list_tasks",
                "show_task",
                "task_stats",
                "toggle_sub_task",
                "toggle_task",
                "update_task",
            ]
        );
        assert!(server.get_info().capabilities.tools.is_some());
    }
}
