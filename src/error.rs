// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::generator::GenerationError;
use crate::generator::client::ChatError;
use crate::quiz::scoring::LengthMismatch;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found (unknown or expired quiz id)
    NotFound(String),

    // 502 Bad Gateway (the external generator failed us)
    BadGateway(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

/// A failed generation is an upstream fault. Timeouts, unparseable
/// content and invalid payloads all land here; the message keeps the
/// precise cause (including the offending question index) for the client.
impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match &err {
            GenerationError::Chat(ChatError::Http(_)) => {
                tracing::error!("Generator unreachable: {}", err);
            }
            _ => tracing::error!("Generation failed: {}", err),
        }
        AppError::BadGateway(err.to_string())
    }
}

impl From<LengthMismatch> for AppError {
    fn from(err: LengthMismatch) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
