//! API route handlers - maps HTTP endpoints to the session core.
//!
//! Each submodule defines routes for a feature area:
//! - `tree`: Fetch a repository tree and read the current snapshot
//! - `selection`: Selection toggles, folder expansion, all/none
//! - `aggregate`: Env-key extraction and merged-file output
//! - `chat`: Model listing and completion submission
//! - `settings`: Read and save persisted client settings

pub mod aggregate;
pub mod chat;
pub mod selection;
pub mod settings;
pub mod tree;

use axum::Router;

use crate::error::Result;
use crate::github::GitHubClient;
use crate::session::SharedState;

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .merge(tree::routes(state.clone()))
        .merge(selection::routes(state.clone()))
        .merge(aggregate::routes(state.clone()))
        .merge(chat::routes(state.clone()))
        .merge(settings::routes(state))
}

/// Build a GitHub client from a per-request token override, falling back to
/// the saved settings token, else unauthenticated.
pub(crate) fn github_client(state: &SharedState, token: Option<String>) -> Result<GitHubClient> {
    let token = match token.filter(|t| !t.is_empty()) {
        Some(t) => Some(t),
        None => {
            let settings = state.settings_snapshot()?;
            if settings.github_token.is_empty() {
                None
            } else {
                Some(settings.github_token)
            }
        }
    };
    GitHubClient::new(token)
}
