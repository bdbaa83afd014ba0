//! OpenAI-compatible completion API client.
//!
//! Two endpoints only: `GET /models` to populate the model picker and
//! `POST /chat/completions` for the actual completion. Error responses are
//! shaped `{ "error": { "message", "code" } }` and surface as one
//! human-readable `RemoteApi` message.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::ChatMessage;

pub const API_BASE: &str = "https://api.openai.com/v1";

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// A finished completion, reduced to what the product needs.
#[derive(Debug, Clone)]
pub struct Completion {
    pub model: String,
    /// Creation time as a unix timestamp, as reported by the API.
    pub created: i64,
    /// Concatenated assistant message content across choices.
    pub content: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    model: String,
    #[serde(default)]
    created: i64,
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    id: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, API_BASE.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(AppError::RemoteApi(
                "OpenAI API key is not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    pub async fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        let value: Value = response
            .json()
            .await
            .map_err(|_| AppError::Network("Non-JSON response from the models endpoint".to_string()))?;

        if !status.is_success() {
            return Err(api_error(&value, status.as_u16()));
        }

        let list: ModelList = serde_json::from_value(value)
            .map_err(|e| AppError::Network(format!("Unexpected models response: {}", e)))?;
        Ok(list.data.into_iter().map(|m| m.id).collect())
    }

    pub async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Completion> {
        let request = ChatCompletionRequest {
            model,
            messages,
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let value: Value = response
            .json()
            .await
            .map_err(|_| AppError::Network("Non-JSON response from the completions endpoint".to_string()))?;

        if !status.is_success() {
            return Err(api_error(&value, status.as_u16()));
        }

        let parsed: ChatCompletionResponse = serde_json::from_value(value)
            .map_err(|e| AppError::Network(format!("Unexpected completion response: {}", e)))?;

        let content = parsed
            .choices
            .iter()
            .map(|c| c.message.content.as_str())
            .collect::<Vec<_>>()
            .join("");

        Ok(Completion {
            model: parsed.model,
            created: parsed.created,
            content,
        })
    }
}

/// Render `{ "error": { "message", "code" } }` as one message; fall back to
/// the HTTP status when the body is not in that shape.
fn api_error(value: &Value, status: u16) -> AppError {
    let detail = value.get("error");
    let message = detail
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str);

    match message {
        Some(msg) => {
            let code = detail
                .and_then(|e| e.get("code"))
                .map(render_code)
                .filter(|c| !c.is_empty());
            match code {
                Some(code) => AppError::RemoteApi(format!("OpenAI API error: {} ({})", msg, code)),
                None => AppError::RemoteApi(format!("OpenAI API error: {}", msg)),
            }
        }
        None => AppError::Network(format!("OpenAI request failed with HTTP {}", status)),
    }
}

fn render_code(code: &Value) -> String {
    match code {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_body_becomes_remote_api_error() {
        let body = json!({"error": {"message": "Rate limit reached", "code": "rate_limit_exceeded"}});
        match api_error(&body, 429) {
            AppError::RemoteApi(msg) => {
                assert_eq!(msg, "OpenAI API error: Rate limit reached (rate_limit_exceeded)")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn null_code_is_omitted() {
        let body = json!({"error": {"message": "Bad request", "code": null}});
        match api_error(&body, 400) {
            AppError::RemoteApi(msg) => assert_eq!(msg, "OpenAI API error: Bad request"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn unshaped_body_falls_back_to_status() {
        let body = json!({"unexpected": true});
        assert!(matches!(api_error(&body, 502), AppError::Network(_)));
    }

    #[test]
    fn missing_api_key_is_rejected_up_front() {
        assert!(OpenAiClient::new(String::new()).is_err());
    }
}
