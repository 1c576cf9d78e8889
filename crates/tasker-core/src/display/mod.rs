//! Display formatting for tasks and operation results.
//!
//! All output is markdown, rendered to the terminal by the CLI and returned
//! verbatim by the MCP server. Domain models implement `Display` directly
//! (see [`models`]); collections and operation results go through newtype
//! wrappers so the same data can be framed differently per context.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Display Wrapper │    │   Formatted     │
//! │ (Task, SubTask) │───▶│    Types        │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: [`Tasks`] and [`Categories`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`]
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: timestamp and due-date formatting
//! - [`models`]: task cards and list lines, with deadline callouts
//!
//! ## Usage
//!
//! ```rust
//! use tasker_core::display::{OperationStatus, Tasks};
//!
//! assert_eq!(Tasks(vec![]).to_string(), "No tasks found.\n");
//!
//! let status = OperationStatus::failure("Deletion requires confirmation");
//! assert!(status.to_string().starts_with("Error:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Categories, Tasks};
pub use datetime::{short_id, DueDate, LocalDateTime};
pub use models::{SubTaskLine, TaskCard, TaskLine};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
