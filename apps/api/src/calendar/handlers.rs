//! Axum route handlers for the content calendar API.

use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::allocator::assign;
use crate::calendar::change::{change_keyword, KeywordChange};
use crate::errors::AppError;
use crate::models::calendar::GenerationState;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtendRequest {
    pub website_id: Uuid,
    pub start_date: NaiveDate,
    pub num_days: u32,
}

#[derive(Debug, Serialize)]
pub struct ExtendResponse {
    pub days_assigned: usize,
    pub days_requested: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChangeKeywordRequest {
    pub content_plan_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct MarkGeneratedRequest {
    pub content_plan_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MarkGeneratedResponse {
    pub content_plan_id: Uuid,
    pub status: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/content-plan/extend
///
/// Schedules more calendar days from the unused pool. Partial fulfillment is
/// reported, not treated as a failure.
pub async fn handle_extend_calendar(
    State(state): State<AppState>,
    Json(request): Json<ExtendRequest>,
) -> Result<Json<ExtendResponse>, AppError> {
    let days_assigned = assign(
        &state.db,
        request.website_id,
        request.start_date,
        request.num_days,
        &state.allocator,
    )
    .await?;

    Ok(Json(ExtendResponse {
        days_assigned,
        days_requested: request.num_days,
    }))
}

/// POST /api/v1/content-plan/change-keyword
///
/// Swaps the keyword of one calendar entry for a random unused one.
pub async fn handle_change_keyword(
    State(state): State<AppState>,
    Json(request): Json<ChangeKeywordRequest>,
) -> Result<Json<KeywordChange>, AppError> {
    let change = change_keyword(&state.db, request.content_plan_id, &state.allocator).await?;
    Ok(Json(change))
}

/// POST /api/v1/content-plan/mark-generated
///
/// Records that the article for a calendar entry has been produced.
pub async fn handle_mark_article_generated(
    State(state): State<AppState>,
    Json(request): Json<MarkGeneratedRequest>,
) -> Result<Json<MarkGeneratedResponse>, AppError> {
    let updated = sqlx::query("UPDATE content_plan SET status = $1 WHERE id = $2")
        .bind(GenerationState::ArticleGenerated.as_str())
        .bind(request.content_plan_id)
        .execute(&state.db)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "content plan entry {}",
            request.content_plan_id
        )));
    }

    Ok(Json(MarkGeneratedResponse {
        content_plan_id: request.content_plan_id,
        status: GenerationState::ArticleGenerated.as_str().to_string(),
    }))
}
