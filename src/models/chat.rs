//! Chat completion DTOs.
//!
//! - `ChatMessage`: Role-tagged message, shared between the API wire format
//!   and the frontend (one message per merged block + the instruction)
//! - `CompletionView`: What the frontend renders for a finished completion

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionView {
    pub model: String,
    /// Completion creation time, formatted for display.
    pub created_at: String,
    /// Concatenated assistant message content.
    pub content: String,
}
