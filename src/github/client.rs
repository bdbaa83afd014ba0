//! GitHub contents API client.
//!
//! Wraps a single `reqwest::Client` and knows the host's two conventions:
//! - listings and metadata come back as JSON, with errors reported as a
//!   `{ "message": … }` body (rate limits, not-found, bad credentials)
//! - raw file content comes back when `Accept: application/vnd.github.v3.raw`
//!   is sent on an authorized request, or from `download_url` without one

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::Entry;

pub const API_BASE: &str = "https://api.github.com";
const RAW_ACCEPT: &str = "application/vnd.github.v3.raw";
const USER_AGENT: &str = concat!("repo-env-viewer/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    client: Client,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        // GitHub rejects requests without a User-Agent.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let token = token.filter(|t| !t.is_empty());
        Ok(Self { client, token })
    }

    fn request(&self, url: &str, raw: bool) -> RequestBuilder {
        let mut req = self.client.get(url);
        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("token {}", token));
        }
        if raw {
            req = req.header("Accept", RAW_ACCEPT);
        }
        req
    }

    /// GET a JSON document (directory listing, file metadata).
    pub async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.request(url, false).send().await?;
        let status = response.status();

        let value: Value = response
            .json()
            .await
            .map_err(|_| AppError::Network(format!("Non-JSON response from {}", url)))?;

        check_payload(value, status.is_success(), url)
    }

    /// GET raw file content through the contents API (requires a token).
    pub async fn get_raw(&self, url: &str) -> Result<String> {
        let response = self.request(url, true).send().await?;
        let status = response.status();

        if !status.is_success() {
            // Error bodies are still JSON even in raw mode.
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| payload_message(&v));
            return Err(match message {
                Some(msg) => AppError::RemoteApi(msg),
                None => AppError::Network(format!("HTTP {} for {}", status, url)),
            });
        }

        Ok(response.text().await?)
    }

    /// GET plain text from a public address (`download_url`).
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(AppError::Network(format!("HTTP {} for {}", status, url)));
        }

        Ok(response.text().await?)
    }

    /// Fetch one file's raw content: the contents URL in raw mode when a
    /// token is configured, the public `download_url` otherwise.
    pub async fn fetch_file_content(&self, entry: &Entry) -> Result<String> {
        if self.token.is_some() {
            return self.get_raw(&entry.url).await;
        }

        match &entry.download_url {
            Some(url) => self.get_text(url).await,
            None => Err(AppError::Network(format!(
                "No public download URL for {}",
                entry.path
            ))),
        }
    }
}

/// Map the host's `{ "message": … }` error convention to `RemoteApi`.
/// The message can appear on non-2xx responses and, for some failures,
/// on 2xx bodies as well, so it is checked unconditionally.
fn check_payload(value: Value, status_ok: bool, url: &str) -> Result<Value> {
    if let Some(message) = payload_message(&value) {
        return Err(AppError::RemoteApi(message));
    }
    if !status_ok {
        return Err(AppError::Network(format!("Request failed for {}", url)));
    }
    Ok(value)
}

fn payload_message(value: &Value) -> Option<String> {
    value
        .as_object()
        .and_then(|obj| obj.get("message"))
        .and_then(Value::as_str)
        .map(String::from)
}

/// Extract `owner/repo` from a GitHub repository URL.
///
/// Accepts `https://github.com/owner/repo`, a bare `github.com/owner/repo`,
/// a trailing `.git`, and deep links with extra path segments.
pub fn parse_repo_url(url: &str) -> Result<String> {
    const MARKER: &str = "github.com/";

    let rest = url
        .find(MARKER)
        .map(|idx| &url[idx + MARKER.len()..])
        .ok_or_else(|| AppError::Parse(url.to_string()))?;

    let mut segments = rest.split('/').filter(|s| !s.is_empty());
    let owner = segments.next().ok_or_else(|| AppError::Parse(url.to_string()))?;
    let repo = segments
        .next()
        .ok_or_else(|| AppError::Parse(url.to_string()))?
        .trim_end_matches(".git");

    if repo.is_empty() {
        return Err(AppError::Parse(url.to_string()));
    }

    Ok(format!("{}/{}", owner, repo))
}

/// Root contents listing URL for a parsed `owner/repo` path.
pub fn contents_url(repo_path: &str) -> String {
    format!("{}/repos/{}/contents", API_BASE, repo_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_https_url() {
        assert_eq!(
            parse_repo_url("https://github.com/rust-lang/rust").unwrap(),
            "rust-lang/rust"
        );
    }

    #[test]
    fn parses_bare_host_and_git_suffix() {
        assert_eq!(
            parse_repo_url("github.com/user/repo.git").unwrap(),
            "user/repo"
        );
    }

    #[test]
    fn parses_deep_link() {
        assert_eq!(
            parse_repo_url("https://github.com/user/repo/tree/main/src").unwrap(),
            "user/repo"
        );
    }

    #[test]
    fn rejects_non_github_url() {
        assert!(matches!(
            parse_repo_url("https://gitlab.com/user/repo"),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn rejects_missing_repo_segment() {
        assert!(matches!(
            parse_repo_url("https://github.com/user"),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn host_message_becomes_remote_api_error() {
        let err = check_payload(json!({"message": "Not Found"}), true, "url").unwrap_err();
        match err {
            AppError::RemoteApi(msg) => assert_eq!(msg, "Not Found"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn array_payload_passes_through() {
        let value = json!([{"name": "a"}]);
        assert_eq!(check_payload(value.clone(), true, "url").unwrap(), value);
    }

    #[test]
    fn failed_status_without_message_is_network_error() {
        assert!(matches!(
            check_payload(json!({}), false, "url"),
            Err(AppError::Network(_))
        ));
    }
}
