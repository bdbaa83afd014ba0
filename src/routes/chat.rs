//! Chat completion endpoints.
//!
//! - GET /api/v1/chat/models
//!   Model ids from the completion API, for the model picker.
//!
//! - POST /api/v1/chat/completions { instruction, token? }
//!   Merges the selected files, sends one user message per merged block
//!   plus the instruction as the final message, and returns the assistant
//!   text. The session's busy flag is guarded so an aborted request always
//!   releases it and never corrupts selection state.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Deserialize;

use crate::aggregate::merge_file_blocks;
use crate::error::{AppError, Result};
use crate::models::{ChatMessage, CompletionView};
use crate::openai::OpenAiClient;
use crate::routes::github_client;
use crate::session::{CompletionGuard, SharedState};

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/chat/models", get(list_models))
        .route("/api/v1/chat/completions", post(create_completion))
        .with_state(state)
}

async fn list_models(State(state): State<SharedState>) -> Result<Json<Vec<String>>> {
    let settings = state.settings_snapshot()?;
    let client = OpenAiClient::new(settings.openai_api_key)?;
    Ok(Json(client.list_models().await?))
}

#[derive(Debug, Deserialize)]
struct CompletionRequest {
    instruction: String,
    token: Option<String>,
}

async fn create_completion(
    State(state): State<SharedState>,
    Json(request): Json<CompletionRequest>,
) -> Result<Json<CompletionView>> {
    let _guard = CompletionGuard::acquire(&state)?;

    let settings = state.settings_snapshot()?;
    let github = github_client(&state, request.token)?;
    let selected = {
        let session = state
            .session
            .read()
            .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        session.selected_entries()
    };

    let blocks = merge_file_blocks(&github, &selected).await;
    let mut messages: Vec<ChatMessage> = blocks.into_iter().map(ChatMessage::user).collect();
    messages.push(ChatMessage::user(request.instruction));

    let client = OpenAiClient::new(settings.openai_api_key)?;
    let completion = client
        .chat_completion(
            &settings.model,
            &messages,
            settings.temperature,
            settings.max_tokens,
        )
        .await?;

    Ok(Json(CompletionView {
        model: completion.model,
        created_at: format_created(completion.created),
        content: completion.content,
    }))
}

fn format_created(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_unix_timestamp() {
        assert_eq!(format_created(0), "1970-01-01 00:00:00 UTC");
    }
}
