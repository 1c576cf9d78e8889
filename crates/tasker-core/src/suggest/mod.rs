//! AI suggestion client contract.
//!
//! A [`SuggestionClient`] turns a task title into a [`TaskSuggestion`]
//! (description, prioritized sub-tasks, overall priority, category) and a
//! sub-task text into a [`Priority`]. Implementations report every failure as
//! a [`SuggestionError`]; callers never surface those errors and apply the
//! deterministic fallback instead ([`TaskSuggestion::fallback`],
//! [`priority_or_default`]).
//!
//! Implementations:
//!
//! - [`GeminiClient`]: calls the Gemini `generateContent` endpoint with a
//!   structured response schema.
//! - [`OfflineSuggestions`]: always fails with
//!   [`SuggestionError::Disabled`], so every task gets fallback metadata.

use async_trait::async_trait;
use log::warn;
use thiserror::Error;

use crate::models::{Priority, DEFAULT_CATEGORY};

mod gemini;

pub use gemini::{GeminiClient, GeminiConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Why a suggestion could not be produced.
#[derive(Error, Debug)]
pub enum SuggestionError {
    /// No client is configured
    #[error("suggestions are disabled")]
    Disabled,
    /// Network or protocol failure
    #[error("suggestion request failed: {0}")]
    Transport(reqwest::Error),
    /// Service answered with a non-success status
    #[error("suggestion service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// Service answered without any text candidate
    #[error("suggestion service returned no content")]
    EmptyResponse,
    /// Response text is not the expected JSON document
    #[error("malformed suggestion: {0}")]
    Decode(#[from] serde_json::Error),
    /// Response parsed but violates the schema
    #[error("suggestion violates schema: {0}")]
    Schema(String),
}

impl From<reqwest::Error> for SuggestionError {
    /// Drops the request URL so endpoint details stay out of log lines.
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url())
    }
}

/// One suggested sub-task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedSubTask {
    pub text: String,
    pub priority: Priority,
}

/// Metadata suggested for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSuggestion {
    pub description: String,
    pub sub_tasks: Vec<SuggestedSubTask>,
    pub priority: Priority,
    pub category: String,
}

impl TaskSuggestion {
    /// Metadata applied whenever enrichment fails: empty description, no
    /// sub-tasks, medium priority, "General" category.
    pub fn fallback() -> Self {
        Self {
            description: String::new(),
            sub_tasks: Vec::new(),
            priority: Priority::Medium,
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// External generative-text service used to enrich tasks.
#[async_trait]
pub trait SuggestionClient: Send + Sync {
    /// Suggests a description, sub-tasks, priority and category for a title.
    async fn suggest_task_breakdown(&self, title: &str)
        -> Result<TaskSuggestion, SuggestionError>;

    /// Suggests a priority for a single sub-task text.
    async fn suggest_sub_task_priority(&self, text: &str) -> Result<Priority, SuggestionError>;
}

/// Client used when no service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSuggestions;

#[async_trait]
impl SuggestionClient for OfflineSuggestions {
    async fn suggest_task_breakdown(
        &self,
        _title: &str,
    ) -> Result<TaskSuggestion, SuggestionError> {
        Err(SuggestionError::Disabled)
    }

    async fn suggest_sub_task_priority(&self, _text: &str) -> Result<Priority, SuggestionError> {
        Err(SuggestionError::Disabled)
    }
}

/// Asks for a sub-task priority, falling back to medium on any failure.
pub async fn priority_or_default(client: &dyn SuggestionClient, text: &str) -> Priority {
    match client.suggest_sub_task_priority(text).await {
        Ok(priority) => priority,
        Err(SuggestionError::Disabled) => Priority::Medium,
        Err(e) => {
            warn!("Sub-task priority suggestion failed, using medium: {e}");
            Priority::Medium
        }
    }
}
