//! Parameter structures for tasker operations
//!
//! Interface-neutral parameter structs shared by the CLI and the MCP server.
//! They carry raw user input (priority names, date strings, id prefixes);
//! validation into typed requests happens in the core through `TryFrom`
//! conversions, so every interface rejects bad input the same way.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Requests  │
//! │  (clap derives) │───▶│ (serde/schema)  │───▶│ (validated)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! JSON schema generation for the MCP layer is behind the `schema` feature.
//!
//! Task identifiers in these structs may be given as a unique prefix of the
//! full id, which is what the CLI displays.

use jiff::{civil::Date, tz::TimeZone, Timestamp};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TaskError},
    models::Priority,
};

/// Parameters for operations requiring just a task id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// Task id or a unique prefix of it
    pub id: String,
}

/// Parameters for creating a new task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateTask {
    /// Title of the task (required)
    pub title: String,
    /// Optional due date, `YYYY-MM-DD` or an RFC 3339 timestamp
    pub due: Option<String>,
}

/// Parameters for listing tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListTasks {
    /// One of `all` (default), `pending`, `completed`
    #[serde(default)]
    pub status: Option<String>,
    /// Case-insensitive text matched against title and description
    #[serde(default)]
    pub search: Option<String>,
    /// Exact category; `All` or absent shows every category
    #[serde(default)]
    pub category: Option<String>,
    /// One of `createdAt` (default), `dueDate`, `priority`
    #[serde(default)]
    pub sort: Option<String>,
}

/// Parameters for updating a task's fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTask {
    /// Task id or a unique prefix of it
    pub id: String,
    pub title: Option<String>,
    /// New description; an empty string clears it
    pub description: Option<String>,
    /// One of `low`, `medium`, `high`
    pub priority: Option<String>,
    pub category: Option<String>,
    /// New due date, `YYYY-MM-DD` or an RFC 3339 timestamp
    pub due: Option<String>,
    /// Remove the due date
    #[serde(default)]
    pub clear_due: bool,
}

/// Parameters for deleting a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteTask {
    /// Task id or a unique prefix of it
    pub id: String,
    /// Must be true for the deletion to happen
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for appending a sub-task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddSubTask {
    /// Parent task id or a unique prefix of it
    pub task_id: String,
    pub text: String,
    /// One of `low`, `medium`, `high`; defaults to medium
    pub priority: Option<String>,
    /// Optional due date, `YYYY-MM-DD` or an RFC 3339 timestamp
    pub due: Option<String>,
    /// Ask the suggestion service for a priority when none is given
    #[serde(default)]
    pub suggest_priority: bool,
}

/// Parameters addressing one sub-task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SubTaskRef {
    /// Parent task id or a unique prefix of it
    pub task_id: String,
    /// Sub-task id or a unique prefix of it
    pub sub_task_id: String,
}

/// Parameters for editing one sub-task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EditSubTask {
    /// Parent task id or a unique prefix of it
    pub task_id: String,
    /// Sub-task id or a unique prefix of it
    pub sub_task_id: String,
    pub text: Option<String>,
    /// One of `low`, `medium`, `high`
    pub priority: Option<String>,
    pub due: Option<String>,
    #[serde(default)]
    pub clear_due: bool,
}

/// Parses a due date given as `YYYY-MM-DD` (midnight UTC) or as a full
/// RFC 3339 timestamp.
///
/// ```rust
/// use tasker_core::params::parse_due_date;
///
/// let due = parse_due_date("2024-06-01")?;
/// assert_eq!(due.to_string(), "2024-06-01T00:00:00Z");
/// assert!(parse_due_date("next tuesday").is_err());
/// # Ok::<(), tasker_core::TaskError>(())
/// ```
pub fn parse_due_date(raw: &str) -> Result<Timestamp> {
    let raw = raw.trim();
    if let Ok(date) = raw.parse::<Date>() {
        return date
            .at(0, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .map(|zoned| zoned.timestamp())
            .map_err(|e| TaskError::invalid_input("due").with_reason(e.to_string()));
    }
    raw.parse::<Timestamp>().map_err(|_| {
        TaskError::invalid_input("due")
            .with_reason(format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got '{raw}'"))
    })
}

pub(crate) fn parse_priority(raw: Option<&str>) -> Result<Option<Priority>> {
    raw.map(|p| {
        p.parse::<Priority>()
            .map_err(|e| TaskError::invalid_input("priority").with_reason(e))
    })
    .transpose()
}

pub(crate) fn parse_due_update(
    raw: Option<&str>,
    clear: bool,
) -> Result<Option<Option<Timestamp>>> {
    match (raw, clear) {
        (Some(_), true) => Err(TaskError::invalid_input("due")
            .with_reason("cannot set and clear the due date at once")),
        (Some(raw), false) => Ok(Some(Some(parse_due_date(raw)?))),
        (None, true) => Ok(Some(None)),
        (None, false) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_due_date_accepts_rfc3339() {
        let due = parse_due_date("2024-06-01T12:30:00Z").unwrap();
        assert_eq!(due.as_second(), 1_717_245_000);
    }

    #[test]
    fn test_parse_due_update_conflict() {
        assert!(parse_due_update(Some("2024-06-01"), true).is_err());
        assert_eq!(parse_due_update(None, true).unwrap(), Some(None));
        assert_eq!(parse_due_update(None, false).unwrap(), None);
    }

    #[test]
    fn test_parse_priority_rejects_unknown() {
        assert!(matches!(
            parse_priority(Some("urgent")),
            Err(TaskError::InvalidInput { .. })
        ));
        assert_eq!(parse_priority(Some("low")).unwrap(), Some(Priority::Low));
        assert_eq!(parse_priority(None).unwrap(), None);
    }
}
