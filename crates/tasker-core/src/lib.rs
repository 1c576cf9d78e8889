//! Core library for the Tasker task manager.
//!
//! This crate holds everything except the user-facing surfaces: the task
//! model, the single-writer [`TaskStore`], the pure derivations (stats,
//! categories, filtered and sorted views), the persistence adapter and the
//! AI suggestion client that enriches new tasks with a description,
//! prioritized sub-tasks, a priority and a category.
//!
//! # Layers
//!
//! - **Models** ([`models`]): tasks, sub-tasks, priorities, filters and
//!   deadline classification
//! - **Derivation** ([`derivation`]): recomputed projections over the
//!   collection
//! - **Storage** ([`storage`]): the collection as one JSON blob in a
//!   key-value store
//! - **Store** ([`store`]): the in-memory collection and its mutations
//! - **Suggestions** ([`suggest`]): the enrichment client contract and its
//!   Gemini implementation
//! - **Facade** ([`tasker`]): the async API used by the CLI and MCP server
//! - **Display** ([`display`]): markdown rendering of all of the above
//!
//! # Quick Start
//!
//! ```rust
//! use tasker_core::{params::{CreateTask, ListTasks}, TaskerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tasker = TaskerBuilder::new()
//!     .with_database_path(Some("tasks.db"))
//!     .build()
//!     .await?;
//!
//! let created = tasker
//!     .create_task_result(&CreateTask {
//!         title: "Plan trip".to_string(),
//!         due: Some("2024-06-01".to_string()),
//!     })
//!     .await?;
//! println!("{created}");
//!
//! let tasks = tasker.list_tasks_result(&ListTasks::default()).await?;
//! for task in &tasks {
//!     println!("{}: {}", task.id, task.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod derivation;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod storage;
pub mod store;
pub mod suggest;
pub mod tasker;

pub use display::{CreateResult, DeleteResult, OperationStatus, Tasks, UpdateResult};
pub use error::{Result, TaskError};
pub use models::{
    Priority, SortOption, StatusFilter, SubTask, Task, TaskFilter, TaskStats, UpdateTaskRequest,
};
pub use store::TaskStore;
pub use suggest::{GeminiClient, GeminiConfig, OfflineSuggestions, SuggestionClient};
pub use tasker::{PendingTask, SuggestionOutcome, Tasker, TaskerBuilder};
