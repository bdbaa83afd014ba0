//! Settings endpoints.
//!
//! - GET /api/v1/settings
//!   Current settings as loaded at startup plus any saves since.
//!
//! - PUT /api/v1/settings
//!   Persists the full settings object and swaps it into memory. Saving is
//!   explicit: nothing else writes the file except the repository URL on a
//!   successful fetch.

use axum::{Json, Router, extract::State, routing::get};

use crate::error::{AppError, Result};
use crate::models::Settings;
use crate::session::SharedState;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/settings", get(get_settings).put(update_settings))
        .with_state(state)
}

async fn get_settings(State(state): State<SharedState>) -> Result<Json<Settings>> {
    Ok(Json(state.settings_snapshot()?))
}

async fn update_settings(
    State(state): State<SharedState>,
    Json(new_settings): Json<Settings>,
) -> Result<Json<Settings>> {
    state.store.save(&new_settings)?;

    let mut settings = state
        .settings
        .write()
        .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    *settings = new_settings.clone();

    Ok(Json(new_settings))
}
