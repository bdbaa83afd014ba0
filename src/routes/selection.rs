//! Selection endpoints.
//!
//! - POST /api/v1/selection/toggle { path, selected }
//!   Toggle one entry; directories cascade over their subtree.
//!
//! - POST /api/v1/selection/folder { path }
//!   Flip a folder's expansion state. Expanding also selects the subtree
//!   and collapsing deselects it (intentional coupling, see session docs).
//!
//! - POST /api/v1/selection/all, POST /api/v1/selection/none
//!   Wholesale replacement of the selection.
//!
//! Every endpoint responds with the full session snapshot so the frontend
//! re-renders from one source of truth.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::TreeView;
use crate::session::{SessionState, SharedState};

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/selection/toggle", post(toggle_entry))
        .route("/api/v1/selection/folder", post(toggle_folder))
        .route("/api/v1/selection/all", post(select_all))
        .route("/api/v1/selection/none", post(select_none))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ToggleRequest {
    path: String,
    selected: bool,
}

#[derive(Debug, Deserialize)]
struct FolderRequest {
    path: String,
}

fn with_session<F>(state: &SharedState, apply: F) -> Result<Json<TreeView>>
where
    F: FnOnce(&mut SessionState),
{
    let mut session = state
        .session
        .write()
        .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    apply(&mut session);
    Ok(Json(session.view()))
}

async fn toggle_entry(
    State(state): State<SharedState>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<TreeView>> {
    with_session(&state, |session| {
        session.toggle_select(&request.path, request.selected)
    })
}

async fn toggle_folder(
    State(state): State<SharedState>,
    Json(request): Json<FolderRequest>,
) -> Result<Json<TreeView>> {
    with_session(&state, |session| {
        session.toggle_folder_expansion(&request.path);
    })
}

async fn select_all(State(state): State<SharedState>) -> Result<Json<TreeView>> {
    with_session(&state, |session| session.select_all())
}

async fn select_none(State(state): State<SharedState>) -> Result<Json<TreeView>> {
    with_session(&state, |session| session.select_none())
}
