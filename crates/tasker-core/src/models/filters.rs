//! Filter and sort selectors for the derived task view.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category sentinel that matches every task.
pub const ALL_CATEGORIES: &str = "All";

/// Completion-status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Completed => "completed",
        }
    }

    /// Whether a task with the given completion flag passes.
    pub fn accepts(&self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !completed,
            StatusFilter::Completed => completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "completed" | "done" => Ok(StatusFilter::Completed),
            _ => Err(format!("Invalid status filter: {s}")),
        }
    }
}

/// Display ordering, applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOption {
    /// Newest first
    #[default]
    CreatedAt,
    /// Soonest due first, undated last
    DueDate,
    /// Highest priority first
    Priority,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::CreatedAt => "createdAt",
            SortOption::DueDate => "dueDate",
            SortOption::Priority => "priority",
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-'], "").as_str() {
            "createdat" | "created" => Ok(SortOption::CreatedAt),
            "duedate" | "due" => Ok(SortOption::DueDate),
            "priority" => Ok(SortOption::Priority),
            _ => Err(format!("Invalid sort option: {s}")),
        }
    }
}

/// The three AND-combined view criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: StatusFilter,
    /// Case-insensitive substring over title or description; empty matches
    /// everything
    pub search: String,
    /// Exact category, or [`ALL_CATEGORIES`]
    pub category: String,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl TaskFilter {
    /// Filter on completion status only.
    pub fn with_status(status: StatusFilter) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }
}

impl TryFrom<&crate::params::ListTasks> for TaskFilter {
    type Error = crate::TaskError;

    /// Validate list parameters into a filter. Absent fields are neutral.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tasker_core::{models::{StatusFilter, TaskFilter}, params::ListTasks};
    ///
    /// let params = ListTasks {
    ///     status: Some("pending".to_string()),
    ///     category: Some("Travel".to_string()),
    ///     ..Default::default()
    /// };
    /// let filter = TaskFilter::try_from(&params)?;
    /// assert_eq!(filter.status, StatusFilter::Pending);
    /// assert_eq!(filter.category, "Travel");
    /// assert!(filter.search.is_empty());
    /// # Ok::<(), tasker_core::TaskError>(())
    /// ```
    fn try_from(params: &crate::params::ListTasks) -> Result<Self, Self::Error> {
        let status = match &params.status {
            Some(raw) => raw
                .parse()
                .map_err(|e: String| crate::TaskError::invalid_input("status").with_reason(e))?,
            None => StatusFilter::All,
        };

        Ok(Self {
            status,
            search: params.search.clone().unwrap_or_default(),
            category: params
                .category
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| ALL_CATEGORIES.to_string()),
        })
    }
}
