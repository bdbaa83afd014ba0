//! Aggregation endpoints.
//!
//! - POST /api/v1/aggregate/env-example { token? }
//!   Scans the selected files for environment-variable references and
//!   returns the sorted key list plus the rendered `.env.example`.
//!
//! - POST /api/v1/aggregate/merge { token? }
//!   Concatenates the selected files into one path-delimited blob.
//!
//! Both operate on a snapshot of the current selection taken before any
//! network call; an empty selection produces empty output.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;

use crate::aggregate::{extract_env_keys, merge_files};
use crate::error::{AppError, Result};
use crate::models::{Entry, EnvExampleResponse, MergeResponse};
use crate::routes::github_client;
use crate::session::SharedState;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/aggregate/env-example", post(generate_env_example))
        .route("/api/v1/aggregate/merge", post(merge_selected_files))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct AggregateRequest {
    token: Option<String>,
}

fn selected_snapshot(state: &SharedState) -> Result<Vec<Entry>> {
    let session = state
        .session
        .read()
        .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    Ok(session.selected_entries())
}

async fn generate_env_example(
    State(state): State<SharedState>,
    Json(request): Json<AggregateRequest>,
) -> Result<Json<EnvExampleResponse>> {
    let client = github_client(&state, request.token)?;
    let selected = selected_snapshot(&state)?;
    Ok(Json(extract_env_keys(&client, &selected).await))
}

async fn merge_selected_files(
    State(state): State<SharedState>,
    Json(request): Json<AggregateRequest>,
) -> Result<Json<MergeResponse>> {
    let client = github_client(&state, request.token)?;
    let selected = selected_snapshot(&state)?;
    Ok(Json(merge_files(&client, &selected).await))
}
