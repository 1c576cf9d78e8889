use std::sync::Arc;

use async_trait::async_trait;
use tasker_core::{
    suggest::{SuggestedSubTask, SuggestionError, TaskSuggestion},
    Priority, SuggestionClient, Tasker, TaskerBuilder,
};
use tempfile::TempDir;

/// Suggestion client returning a fixed breakdown for every title.
pub struct CannedSuggestions(pub TaskSuggestion);

#[async_trait]
impl SuggestionClient for CannedSuggestions {
    async fn suggest_task_breakdown(
        &self,
        _title: &str,
    ) -> Result<TaskSuggestion, SuggestionError> {
        Ok(self.0.clone())
    }

    async fn suggest_sub_task_priority(&self, _text: &str) -> Result<Priority, SuggestionError> {
        Ok(Priority::High)
    }
}

/// The breakdown the service gives for "Plan trip".
pub fn plan_trip() -> TaskSuggestion {
    TaskSuggestion {
        description: "Get ready for the trip".to_string(),
        sub_tasks: vec![SuggestedSubTask {
            text: "Book flight".to_string(),
            priority: Priority::High,
        }],
        priority: Priority::High,
        category: "Travel".to_string(),
    }
}

/// Helper function to create a test tasker backed by a temporary database
pub async fn create_test_tasker(client: Arc<dyn SuggestionClient>) -> (TempDir, Tasker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tasker = TaskerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_suggestion_client(client)
        .build()
        .await
        .expect("Failed to create tasker");
    (temp_dir, tasker)
}
