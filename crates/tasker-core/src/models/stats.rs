//! Aggregate statistics over a task collection.

use serde::{Deserialize, Serialize};

/// Derived counters over the whole collection. Never stored; recomputed on
/// every read via [`crate::derivation::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Incomplete tasks with high priority
    pub high_priority: usize,
}
