use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// External-service failures deliberately have no variant here: the research
/// pipeline recovers from them locally with degraded fallback data and never
/// propagates them to a caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No keywords passed the difficulty filter")]
    NoQualifyingKeywords,

    #[error("No unused keywords available for allocation")]
    NoAvailableKeywords,

    #[error("No unused keywords left in the pool")]
    NoUnusedKeywords,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NoQualifyingKeywords => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_QUALIFYING_KEYWORDS",
                "No keywords found below the difficulty threshold. Try different seed keywords."
                    .to_string(),
            ),
            AppError::NoAvailableKeywords => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_AVAILABLE_KEYWORDS",
                "No unused keywords available. Generate more keywords to extend the calendar."
                    .to_string(),
            ),
            AppError::NoUnusedKeywords => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_UNUSED_KEYWORDS",
                "All pool keywords are already assigned to the calendar.".to_string(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
