//! Error mapping for the MCP server

use rmcp::ErrorData;
use tasker_core::TaskError;

/// Converts a core error into an MCP error, prefixed with what was being
/// attempted. Bad input and unknown ids are the caller's to fix and come back
/// as invalid parameters; everything else is an internal error.
pub fn to_mcp_error(message: &str, error: &TaskError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        TaskError::InvalidInput { .. } | TaskError::TaskNotFound { .. } => {
            ErrorData::invalid_params(text, None)
        }
        _ => ErrorData::internal_error(text, None),
    }
}
