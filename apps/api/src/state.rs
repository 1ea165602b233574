use std::sync::Arc;

use sqlx::PgPool;

use crate::calendar::allocator::AllocatorTuning;
use crate::config::Config;
use crate::research::engine::KeywordResearchEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Research pipeline with its provider and expander wired in. Shared, so
    /// a single reqwest connection pool serves all requests.
    pub engine: Arc<KeywordResearchEngine>,
    pub allocator: AllocatorTuning,
    pub config: Config,
}
