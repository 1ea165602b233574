use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// All external-client credentials live here and are passed into the
/// services that need them at construction time — no module-level
/// singletons reading the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// DataForSEO `Basic` credential. Optional: without it the research
    /// pipeline runs entirely on template/mock data (useful for local dev).
    pub dataforseo_api_key: Option<String>,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Candidates with difficulty at or above this never enter the pool.
    pub difficulty_threshold: i32,
    /// The allocator picks pseudo-randomly among this many top-scored
    /// unused keywords per calendar slot.
    pub selection_window: usize,
    /// Upper bound on candidates returned by one research run.
    pub max_candidates: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            dataforseo_api_key: std::env::var("DATAFORSEO_API_KEY").ok(),
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            // Clamped: a threshold outside 0..=100 is meaningless against
            // 0-100 difficulty data, and a zero window cannot pick anything.
            difficulty_threshold: parse_env("KEYWORD_DIFFICULTY_THRESHOLD", 35)?.clamp(0, 100),
            selection_window: parse_env::<usize>("SELECTION_WINDOW", 20)?.max(1),
            max_candidates: parse_env("MAX_KEYWORD_CANDIDATES", 200)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' must be a valid number")),
        Err(_) => Ok(default),
    }
}
