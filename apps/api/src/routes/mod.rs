pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::calendar::handlers as calendar_handlers;
use crate::pool::handlers as pool_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Onboarding
        .route(
            "/api/v1/onboarding/complete",
            post(pool_handlers::handle_onboarding_complete),
        )
        // Keyword pool
        .route("/api/v1/keywords", get(pool_handlers::handle_list_keywords))
        .route(
            "/api/v1/keywords/unused-count",
            get(pool_handlers::handle_unused_count),
        )
        // Content calendar
        .route(
            "/api/v1/content-plan/extend",
            post(calendar_handlers::handle_extend_calendar),
        )
        .route(
            "/api/v1/content-plan/change-keyword",
            post(calendar_handlers::handle_change_keyword),
        )
        .route(
            "/api/v1/content-plan/mark-generated",
            post(calendar_handlers::handle_mark_article_generated),
        )
        .with_state(state)
}
