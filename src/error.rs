//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` enum for all error conditions and implements Axum's
//! `IntoResponse` to automatically convert errors to appropriate HTTP responses
//! with JSON error bodies.
//!
//! Error mappings:
//! - `Parse` → 400
//! - `RemoteApi`, `Network` → 502
//! - `Settings`, `Internal` → 500
//!
//! Partial failures (one abandoned subtree, one unreadable file) are not
//! errors at all: they degrade to warnings or inline markers in the result.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid repository URL: {0}")]
    Parse(String),

    #[error("Remote API error: {0}")]
    RemoteApi(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Parse(msg) => {
                (StatusCode::BAD_REQUEST, format!("Invalid repository URL: {}", msg))
            }
            AppError::RemoteApi(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Network(msg) => {
                (StatusCode::BAD_GATEWAY, format!("Network error: {}", msg))
            }
            AppError::Settings(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Settings error: {}", msg))
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
