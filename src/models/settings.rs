//! Persisted client settings.
//!
//! Read once at startup, written on explicit save. Every field has a
//! hardcoded default so a missing or partially-written settings file
//! degrades to defaults instead of failing.

use serde::{Deserialize, Serialize};

pub const DEFAULT_REPO_URL: &str = "https://github.com/octocat/Hello-World";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub github_token: String,
    pub repo_url: String,
    pub openai_api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            github_token: String::new(),
            repo_url: DEFAULT_REPO_URL.to_string(),
            openai_api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}
