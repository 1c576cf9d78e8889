//! MCP tool handlers implementation

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tasker_core::{display::OperationStatus, params as core, Tasker};

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types.
///
/// Passes (de)serialization and schema generation straight through to the
/// wrapped type, so the tool schemas are exactly the core parameter structs.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T> McpParams<T>
where
    T: JsonSchema,
{
    pub fn into_inner(self) -> T {
        self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateTask = McpParams<core::CreateTask>;
pub type ListTasks = McpParams<core::ListTasks>;
pub type UpdateTask = McpParams<core::UpdateTask>;
pub type DeleteTask = McpParams<core::DeleteTask>;
pub type AddSubTask = McpParams<core::AddSubTask>;
pub type SubTaskRef = McpParams<core::SubTaskRef>;
pub type EditSubTask = McpParams<core::EditSubTask>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(body.to_string())]))
}

/// Unknown ids leave the collection untouched; the caller is told so
/// instead of receiving an error.
fn no_match(id: &str) -> McpResult {
    text(OperationStatus::no_match(id))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    tasker: Tasker,
}

impl McpHandlers {
    pub fn new(tasker: Tasker) -> Self {
        Self { tasker }
    }

    pub async fn create_task(&self, Parameters(params): Parameters<CreateTask>) -> McpResult {
        debug!("create_task: {:?}", params);

        let result = self
            .tasker
            .create_task_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create task", &e))?;
        text(result)
    }

    pub async fn list_tasks(&self, Parameters(params): Parameters<ListTasks>) -> McpResult {
        debug!("list_tasks: {:?}", params);

        let tasks = self
            .tasker
            .list_tasks_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list tasks", &e))?;

        let title = if tasks.is_empty() {
            "No matching tasks"
        } else {
            "Tasks"
        };
        text(format!("# {title}\n\n{tasks}"))
    }

    pub async fn show_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_task: {:?}", params);

        let task = self
            .tasker
            .show_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get task", &e))?;
        text(task)
    }

    pub async fn update_task(&self, Parameters(params): Parameters<UpdateTask>) -> McpResult {
        debug!("update_task: {:?}", params);

        let params = params.into_inner();
        let id = params.id.clone();
        match self
            .tasker
            .update_task_result(params)
            .await
            .map_err(|e| to_mcp_error("Failed to update task", &e))?
        {
            Some(result) => text(result),
            None => no_match(&id),
        }
    }

    pub async fn toggle_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("toggle_task: {:?}", params);

        match self
            .tasker
            .toggle_task_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to toggle task", &e))?
        {
            Some(result) => text(result),
            None => no_match(&params.as_ref().id),
        }
    }

    pub async fn delete_task(&self, Parameters(params): Parameters<DeleteTask>) -> McpResult {
        debug!("delete_task: {:?}", params);

        match self
            .tasker
            .delete_task_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete task", &e))?
        {
            Some(result) => text(result),
            None => no_match(&params.as_ref().id),
        }
    }

    pub async fn task_stats(&self) -> McpResult {
        text(self.tasker.stats().await)
    }

    pub async fn list_categories(&self) -> McpResult {
        let categories = self.tasker.categories_result().await;
        text(format!("# Categories\n\n{categories}"))
    }

    pub async fn add_sub_task(&self, Parameters(params): Parameters<AddSubTask>) -> McpResult {
        debug!("add_sub_task: {:?}", params);

        match self
            .tasker
            .add_sub_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add sub-task", &e))?
        {
            Some(task) => text(task),
            None => no_match(&params.as_ref().task_id),
        }
    }

    pub async fn toggle_sub_task(&self, Parameters(params): Parameters<SubTaskRef>) -> McpResult {
        debug!("toggle_sub_task: {:?}", params);

        match self
            .tasker
            .toggle_sub_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to toggle sub-task", &e))?
        {
            Some(task) => text(task),
            None => no_match(&params.as_ref().sub_task_id),
        }
    }

    pub async fn edit_sub_task(&self, Parameters(params): Parameters<EditSubTask>) -> McpResult {
        debug!("edit_sub_task: {:?}", params);

        match self
            .tasker
            .edit_sub_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to edit sub-task", &e))?
        {
            Some(task) => text(task),
            None => no_match(&params.as_ref().sub_task_id),
        }
    }

    pub async fn delete_sub_task(&self, Parameters(params): Parameters<SubTaskRef>) -> McpResult {
        debug!("delete_sub_task: {:?}", params);

        match self
            .tasker
            .delete_sub_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete sub-task", &e))?
        {
            Some(task) => text(task),
            None => no_match(&params.as_ref().sub_task_id),
        }
    }
}
