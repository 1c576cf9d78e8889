//! Gemini `generateContent` client.

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{SuggestedSubTask, SuggestionClient, SuggestionError, TaskSuggestion};
use crate::models::{Priority, DEFAULT_CATEGORY};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
}

impl GeminiConfig {
    /// Config with the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// Suggestion client backed by the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// The key goes in a header; URLs end up in error text.
    fn post<T: Serialize>(&self, body: &T) -> reqwest::RequestBuilder {
        self.http
            .post(self.config.url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
    }

    /// Sends one prompt with a structured response schema and returns the
    /// concatenated candidate text.
    async fn generate(&self, prompt: String, schema: Value) -> Result<String, SuggestionError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        debug!("Requesting suggestion from model {}", self.config.model);
        let response = self.post(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        candidate_text(body)
    }
}

#[async_trait]
impl SuggestionClient for GeminiClient {
    async fn suggest_task_breakdown(
        &self,
        title: &str,
    ) -> Result<TaskSuggestion, SuggestionError> {
        let text = self
            .generate(breakdown_prompt(title), breakdown_schema())
            .await?;
        decode_breakdown(&text)
    }

    async fn suggest_sub_task_priority(&self, text: &str) -> Result<Priority, SuggestionError> {
        let answer = self
            .generate(sub_task_prompt(text), priority_schema())
            .await?;
        decode_priority(&answer)
    }
}

fn breakdown_prompt(title: &str) -> String {
    format!(
        "Analyze the task: \"{title}\". Suggest a brief description, a few logical sub-steps \
         with individual priority levels, an appropriate overall priority level, and a single \
         word category."
    )
}

fn sub_task_prompt(text: &str) -> String {
    format!(
        "Analyze this specific sub-task: \"{text}\". Suggest a priority level: low, medium, or high."
    )
}

fn priority_property() -> Value {
    json!({
        "type": "STRING",
        "enum": ["low", "medium", "high"],
        "description": "One of: low, medium, high"
    })
}

fn breakdown_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "description": { "type": "STRING" },
            "subTasks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": { "type": "STRING" },
                        "priority": priority_property()
                    },
                    "required": ["text", "priority"]
                }
            },
            "priority": priority_property(),
            "category": { "type": "STRING" }
        },
        "required": ["description", "subTasks", "priority", "category"]
    })
}

fn priority_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": { "priority": priority_property() },
        "required": ["priority"]
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Text of the first candidate, all parts joined.
fn candidate_text(response: GenerateContentResponse) -> Result<String, SuggestionError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(SuggestionError::EmptyResponse);
    }
    Ok(text)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBreakdown {
    description: String,
    sub_tasks: Vec<RawSubTask>,
    priority: String,
    category: String,
}

#[derive(Deserialize)]
struct RawSubTask {
    text: String,
    priority: String,
}

#[derive(Deserialize)]
struct RawPriority {
    priority: String,
}

/// Accepts only the exact lowercase values of the response schema enum.
fn strict_priority(raw: &str) -> Result<Priority, SuggestionError> {
    match raw {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        other => Err(SuggestionError::Schema(format!(
            "priority must be low, medium or high, got '{other}'"
        ))),
    }
}

/// Decodes a breakdown answer, rejecting anything outside the schema.
pub(crate) fn decode_breakdown(text: &str) -> Result<TaskSuggestion, SuggestionError> {
    let raw: RawBreakdown = serde_json::from_str(text)?;

    let mut sub_tasks = Vec::with_capacity(raw.sub_tasks.len());
    for sub_task in raw.sub_tasks {
        let priority = strict_priority(&sub_task.priority)?;
        let text = sub_task.text.trim();
        if text.is_empty() {
            continue;
        }
        sub_tasks.push(SuggestedSubTask {
            text: text.to_string(),
            priority,
        });
    }

    let category = raw.category.trim();
    Ok(TaskSuggestion {
        description: raw.description.trim().to_string(),
        sub_tasks,
        priority: strict_priority(&raw.priority)?,
        category: if category.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category.to_string()
        },
    })
}

/// Decodes a sub-task priority answer.
pub(crate) fn decode_priority(text: &str) -> Result<Priority, SuggestionError> {
    let raw: RawPriority = serde_json::from_str(text)?;
    strict_priority(&raw.priority)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN_TRIP: &str = r#"{
        "description": "Organize the summer trip",
        "subTasks": [{"text": "Book flight", "priority": "high"}],
        "priority": "high",
        "category": "Travel"
    }"#;

    #[test]
    fn test_decode_valid_breakdown() {
        let suggestion = decode_breakdown(PLAN_TRIP).unwrap();
        assert_eq!(suggestion.priority, Priority::High);
        assert_eq!(suggestion.category, "Travel");
        assert_eq!(
            suggestion.sub_tasks,
            vec![SuggestedSubTask {
                text: "Book flight".to_string(),
                priority: Priority::High,
            }]
        );
    }

    #[test]
    fn test_decode_rejects_bad_enum() {
        let text = r#"{"description":"","subTasks":[],"priority":"urgent","category":"Work"}"#;
        assert!(matches!(
            decode_breakdown(text),
            Err(SuggestionError::Schema(_))
        ));

        let text = r#"{"description":"","subTasks":[{"text":"a","priority":"meh"}],
                       "priority":"low","category":"Work"}"#;
        assert!(matches!(
            decode_breakdown(text),
            Err(SuggestionError::Schema(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_json_and_missing_fields() {
        assert!(matches!(
            decode_breakdown("Sure! Here is a plan"),
            Err(SuggestionError::Decode(_))
        ));
        assert!(matches!(
            decode_breakdown(r#"{"priority":"low"}"#),
            Err(SuggestionError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_normalizes_blank_values() {
        let text = r#"{"description":"  ","subTasks":[{"text":" ","priority":"low"},
                       {"text":"Pack","priority":"medium"}],"priority":"low","category":""}"#;
        let suggestion = decode_breakdown(text).unwrap();
        assert_eq!(suggestion.description, "");
        assert_eq!(suggestion.category, "General");
        assert_eq!(suggestion.sub_tasks.len(), 1);
        assert_eq!(suggestion.sub_tasks[0].text, "Pack");
    }

    #[test]
    fn test_decode_priority() {
        assert_eq!(decode_priority(r#"{"priority":"high"}"#).unwrap(), Priority::High);
        assert!(decode_priority(r#"{"priority":""}"#).is_err());
        assert!(decode_priority("{}").is_err());
    }

    #[test]
    fn test_decode_priority_requires_exact_enum_value() {
        for raw in ["HIGH", "High", " low", "medium "] {
            let text = format!(r#"{{"priority":"{raw}"}}"#);
            assert!(
                matches!(decode_priority(&text), Err(SuggestionError::Schema(_))),
                "{raw:?} should be rejected"
            );
        }
        let text = r#"{"description":"","subTasks":[],"priority":"Low","category":"Work"}"#;
        assert!(matches!(
            decode_breakdown(text),
            Err(SuggestionError::Schema(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_error_does_not_expose_api_key() {
        let client = GeminiClient::new(
            GeminiConfig::new("SECRET-KEY-123").with_endpoint("http://127.0.0.1:9/v1beta"),
        );

        let error = client
            .suggest_task_breakdown("Plan trip")
            .await
            .expect_err("Nothing listens on the discard port");
        assert!(matches!(error, SuggestionError::Transport(_)));
        assert!(!error.to_string().contains("SECRET-KEY-123"));
        assert!(!format!("{error:?}").contains("SECRET-KEY-123"));
    }

    #[test]
    fn test_api_key_travels_in_header() {
        let client = GeminiClient::new(
            GeminiConfig::new("SECRET-KEY-123").with_endpoint("http://127.0.0.1:9/v1beta"),
        );
        let request = client.post(&serde_json::json!({})).build().unwrap();
        assert_eq!(request.headers()[API_KEY_HEADER], "SECRET-KEY-123");
        assert!(!request.url().as_str().contains("SECRET-KEY-123"));
        assert!(request.url().query().is_none());
    }

    #[test]
    fn test_candidate_text() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"prio"},{"text":"rity\":\"low\"}"}]}}]}"#,
        )
        .unwrap();
        let text = candidate_text(body).unwrap();
        assert_eq!(decode_priority(&text).unwrap(), Priority::Low);

        let empty: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(
            candidate_text(empty),
            Err(SuggestionError::EmptyResponse)
        ));
    }

    #[test]
    fn test_request_shape() {
        let config = GeminiConfig::new("secret").with_endpoint("http://localhost:9/v1beta/");
        assert_eq!(
            config.url(),
            "http://localhost:9/v1beta/models/gemini-3-flash-preview:generateContent"
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: breakdown_prompt("Plan trip"),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: breakdown_schema(),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            value["generationConfig"]["responseSchema"]["required"][1],
            "subTasks"
        );
        assert!(value["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Analyze the task: \"Plan trip\""));
    }
}
