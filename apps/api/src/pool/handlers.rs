//! Axum route handlers for onboarding and the keyword pool.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::allocator::assign;
use crate::errors::AppError;
use crate::models::keyword::PoolKeywordRow;
use crate::pool::store::{insert_keyword_pool, list_keywords, unused_keyword_count};
use crate::state::AppState;

/// Days scheduled immediately after onboarding. Later extensions go through
/// the content-plan extend endpoint.
const FIRST_WINDOW_DAYS: u32 = 7;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OnboardingRequest {
    pub website_id: Uuid,
    pub seed_keywords: Vec<String>,
    #[serde(default)]
    pub target_audience: String,
}

#[derive(Debug, Serialize)]
pub struct OnboardingResponse {
    pub keywords_generated: usize,
    pub days_assigned: usize,
    /// True when any research stage ran on fallback data.
    pub degraded: bool,
}

#[derive(Debug, Deserialize)]
pub struct WebsiteQuery {
    pub website_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct UnusedCountResponse {
    pub website_id: Uuid,
    pub unused_count: i64,
}

#[derive(Debug, Serialize)]
pub struct KeywordListResponse {
    pub website_id: Uuid,
    pub keywords: Vec<PoolKeywordRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/onboarding/complete
///
/// Runs the full pipeline for a new website: research seeds, persist the
/// keyword pool, schedule the first calendar week.
pub async fn handle_onboarding_complete(
    State(state): State<AppState>,
    Json(request): Json<OnboardingRequest>,
) -> Result<Json<OnboardingResponse>, AppError> {
    let outcome = state
        .engine
        .research(
            &request.seed_keywords,
            &request.target_audience,
            state.config.max_candidates,
        )
        .await?;
    if outcome.candidates.is_empty() {
        return Err(AppError::NoQualifyingKeywords);
    }

    let seeds: Vec<String> = request
        .seed_keywords
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let keywords_generated =
        insert_keyword_pool(&state.db, request.website_id, &outcome.candidates, &seeds).await?;

    let days_assigned = assign(
        &state.db,
        request.website_id,
        Utc::now().date_naive(),
        FIRST_WINDOW_DAYS,
        &state.allocator,
    )
    .await?;

    Ok(Json(OnboardingResponse {
        keywords_generated,
        days_assigned,
        degraded: outcome.degraded.any(),
    }))
}

/// GET /api/v1/keywords?website_id=...
///
/// The full researched pool for a website, best score first.
pub async fn handle_list_keywords(
    State(state): State<AppState>,
    Query(query): Query<WebsiteQuery>,
) -> Result<Json<KeywordListResponse>, AppError> {
    let keywords = list_keywords(&state.db, query.website_id).await?;
    Ok(Json(KeywordListResponse {
        website_id: query.website_id,
        keywords,
    }))
}

/// GET /api/v1/keywords/unused-count?website_id=...
///
/// How many keywords remain schedulable. The dashboard uses this to prompt
/// for fresh research before the pool runs dry.
pub async fn handle_unused_count(
    State(state): State<AppState>,
    Query(query): Query<WebsiteQuery>,
) -> Result<Json<UnusedCountResponse>, AppError> {
    let unused_count = unused_keyword_count(&state.db, query.website_id).await?;
    Ok(Json(UnusedCountResponse {
        website_id: query.website_id,
        unused_count,
    }))
}
