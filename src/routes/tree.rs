//! Tree fetching endpoints.
//!
//! - POST /api/v1/tree/fetch { repo_url, token? }
//!   Fetches and flattens the repository tree, replaces the session tree,
//!   resets the selection to everything and collapses all folders. The URL
//!   is persisted into settings so the next session starts from it.
//!
//! - GET /api/v1/tree
//!   Current session snapshot (entries + selection + expansion + warnings).

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::warn;

use crate::error::{AppError, Result};
use crate::github::{fetch_tree, parse_repo_url};
use crate::models::TreeView;
use crate::routes::github_client;
use crate::session::SharedState;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/tree/fetch", post(fetch_repository_tree))
        .route("/api/v1/tree", get(get_tree))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct FetchRequest {
    repo_url: String,
    token: Option<String>,
}

async fn fetch_repository_tree(
    State(state): State<SharedState>,
    Json(request): Json<FetchRequest>,
) -> Result<Json<TreeView>> {
    let repo_path = parse_repo_url(&request.repo_url)?;
    let client = github_client(&state, request.token)?;

    let outcome = fetch_tree(&client, &repo_path).await?;

    {
        let mut settings = state
            .settings
            .write()
            .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        settings.repo_url = request.repo_url.clone();
        if let Err(e) = state.store.save(&settings) {
            warn!("Could not persist repository URL: {}", e);
        }
    }

    let mut session = state
        .session
        .write()
        .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    session.replace_tree(outcome.entries, outcome.warnings);
    Ok(Json(session.view()))
}

async fn get_tree(State(state): State<SharedState>) -> Result<Json<TreeView>> {
    let session = state
        .session
        .read()
        .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    Ok(Json(session.view()))
}
