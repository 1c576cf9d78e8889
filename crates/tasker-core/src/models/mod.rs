//! Data models for tasks and sub-tasks.
//!
//! This module contains the domain models of the tasker system. The task
//! collection is the single source of truth; everything else in here
//! ([`TaskStats`], [`TaskFilter`], [`Deadline`]) is either a projection of
//! that collection or a selector over it.
//!
//! Display implementations live in [`crate::display::models`] so the data
//! structures stay free of presentation logic.
//!
//! # Persisted shape
//!
//! Tasks serialize to the same camelCase JSON blob the web front end kept in
//! local storage, with timestamps as epoch milliseconds:
//!
//! ```rust
//! use jiff::Timestamp;
//! use tasker_core::models::{Priority, Task};
//!
//! let task = Task {
//!     id: "8d1f".to_string(),
//!     title: "Buy milk".to_string(),
//!     description: None,
//!     completed: false,
//!     priority: Priority::Medium,
//!     category: "General".to_string(),
//!     created_at: Timestamp::from_millisecond(1_717_200_000_000).unwrap(),
//!     due_date: None,
//!     sub_tasks: vec![],
//! };
//!
//! let json = serde_json::to_string(&task).unwrap();
//! assert!(json.contains("\"createdAt\":1717200000000"));
//! assert!(!json.contains("dueDate"));
//! ```

pub mod deadline;
pub mod filters;
pub(crate) mod millis;
pub mod priority;
pub mod requests;
pub mod stats;
pub mod task;


pub use deadline::{Deadline, Urgency};
pub use filters::{SortOption, StatusFilter, TaskFilter, ALL_CATEGORIES};
pub use priority::Priority;
pub use requests::{NewSubTask, NewTask, SubTaskEdit, UpdateTaskRequest};
pub use stats::TaskStats;
pub use task::{SubTask, Task, DEFAULT_CATEGORY};
