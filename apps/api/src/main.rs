mod calendar;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod pool;
mod research;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::calendar::allocator::AllocatorTuning;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::research::client::DataForSeoClient;
use crate::research::engine::{KeywordResearchEngine, ResearchTuning};
use crate::research::expander::LlmSeedExpander;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RankPilot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and bring the schema up to date
    let db = create_pool(&config.database_url).await?;
    sqlx::migrate!("../../migrations").run(&db).await?;
    info!("Database migrations applied");

    // Keyword research stack: external data provider + LLM seed expander
    let provider = DataForSeoClient::new(config.dataforseo_api_key.clone());
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let expander = LlmSeedExpander::new(llm);
    let tuning = ResearchTuning {
        difficulty_threshold: config.difficulty_threshold,
        ..Default::default()
    };
    let engine = Arc::new(KeywordResearchEngine::new(
        Arc::new(provider),
        Arc::new(expander),
        tuning,
    ));

    let allocator = AllocatorTuning {
        selection_window: config.selection_window,
        ..Default::default()
    };

    let state = AppState {
        db,
        engine,
        allocator,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
