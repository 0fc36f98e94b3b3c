// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Every rejection carries an UPPER_SNAKE reason code in the `error` field
//! so API consumers can branch on it without parsing prose.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Not allowed: {0}")]
    Forbidden(&'static str),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(&'static str),

    #[error("Conflict: {0}")]
    Conflict(&'static str),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN", None),
            AppError::Forbidden(code) => (StatusCode::FORBIDDEN, *code, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", Some(msg.clone()))
            }
            AppError::Validation(code) => (StatusCode::BAD_REQUEST, *code, None),
            AppError::Conflict(code) => (StatusCode::CONFLICT, *code, None),
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
