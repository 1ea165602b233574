//! External keyword-data provider.
//!
//! `ResearchProvider` is the seam the engine talks to; `DataForSeoClient` is
//! the production implementation against the DataForSEO Labs live endpoints.
//! Tests substitute an in-memory fake — nothing here is a process global.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

const DATAFORSEO_API_URL: &str = "https://api.dataforseo.com/v3";
const SUGGESTIONS_ENDPOINT: &str = "/dataforseo_labs/google/keyword_suggestions/live";
const DIFFICULTY_ENDPOINT: &str = "/dataforseo_labs/google/bulk_keyword_difficulty/live";
/// DataForSEO wraps every payload in a task envelope with this OK code.
const STATUS_OK: u32 = 20000;

#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("research API key not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u32, message: String },

    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error("call timed out")]
    Timeout,
}

/// One candidate keyword as returned by the suggestion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSuggestion {
    pub keyword: String,
    pub search_volume: i64,
    /// Paid-ads competition in [0, 1]. Distinct from SEO difficulty.
    pub competition_ratio: f64,
    pub competition_level: String,
}

/// Difficulty score for one keyword from the bulk endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordDifficulty {
    pub keyword: String,
    /// 0–100, lower is easier to rank for.
    pub difficulty: i32,
    pub search_volume: i64,
}

#[async_trait]
pub trait ResearchProvider: Send + Sync {
    /// Fetches up to `limit` suggestions for a single seed keyword.
    async fn keyword_suggestions(
        &self,
        seed: &str,
        limit: usize,
        location_code: u32,
        language_code: &str,
    ) -> Result<Vec<KeywordSuggestion>, ResearchError>;

    /// Fetches difficulty scores for a batch of keywords.
    /// Callers must respect the provider's 1000-keyword batch limit.
    async fn bulk_keyword_difficulty(
        &self,
        keywords: &[String],
        location_code: u32,
        language_code: &str,
    ) -> Result<Vec<KeywordDifficulty>, ResearchError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire envelope
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status_code: u32,
    status_message: String,
    #[serde(default = "Vec::new")]
    tasks: Vec<ApiTask<T>>,
}

#[derive(Debug, Deserialize)]
struct ApiTask<T> {
    status_code: u32,
    result: Option<Vec<TaskResult<T>>>,
}

#[derive(Debug, Deserialize)]
struct TaskResult<T> {
    items: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct SuggestionItem {
    keyword: Option<String>,
    keyword_info: Option<KeywordInfo>,
}

#[derive(Debug, Deserialize)]
struct KeywordInfo {
    search_volume: Option<i64>,
    competition: Option<f64>,
    competition_level: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DifficultyItem {
    keyword: Option<String>,
    keyword_difficulty: Option<i32>,
    search_volume: Option<i64>,
}

// ────────────────────────────────────────────────────────────────────────────
// DataForSEO client
// ────────────────────────────────────────────────────────────────────────────

pub struct DataForSeoClient {
    client: Client,
    /// Pre-encoded `Basic` credential. `None` means every call fails with
    /// `NotConfigured` and the engine runs on template data instead.
    api_key: Option<String>,
    base_url: String,
}

impl DataForSeoClient {
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_none() {
            warn!("DATAFORSEO_API_KEY not set — keyword research will use template data");
        }
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: DATAFORSEO_API_URL.to_string(),
        }
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<T>, ResearchError> {
        let api_key = self.api_key.as_deref().ok_or(ResearchError::NotConfigured)?;

        let response = self
            .client
            .post(format!("{}{}", self.base_url, endpoint))
            .header("Authorization", format!("Basic {api_key}"))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ResearchError::Api {
                status: status.as_u16() as u32,
                message,
            });
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        if envelope.status_code != STATUS_OK {
            return Err(ResearchError::Api {
                status: envelope.status_code,
                message: envelope.status_message,
            });
        }

        let task = envelope
            .tasks
            .into_iter()
            .next()
            .ok_or_else(|| ResearchError::Shape("response carried no tasks".to_string()))?;
        if task.status_code != STATUS_OK {
            return Err(ResearchError::Api {
                status: task.status_code,
                message: "task-level error".to_string(),
            });
        }

        Ok(task
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|r| r.items)
            .unwrap_or_default())
    }
}

#[async_trait]
impl ResearchProvider for DataForSeoClient {
    async fn keyword_suggestions(
        &self,
        seed: &str,
        limit: usize,
        location_code: u32,
        language_code: &str,
    ) -> Result<Vec<KeywordSuggestion>, ResearchError> {
        let body = json!([{
            "keyword": seed,
            "location_code": location_code,
            "language_code": language_code,
            "include_seed_keyword": false,
            "include_serp_info": false,
            "ignore_synonyms": false,
            // Prefilter on the provider side: high-competition terms are
            // never going to pass the difficulty bar anyway.
            "filters": [
                ["keyword_info.competition_level", "=", "LOW"],
                "or",
                ["keyword_info.competition_level", "=", "MEDIUM"]
            ],
            "include_clickstream_data": false,
            "exact_match": false,
            "limit": limit
        }]);

        let items: Vec<SuggestionItem> = self.post(SUGGESTIONS_ENDPOINT, &body).await?;
        debug!("suggestion call for '{seed}' returned {} items", items.len());

        Ok(items
            .into_iter()
            .filter_map(|item| {
                let keyword = item.keyword?.trim().to_string();
                if keyword.is_empty() {
                    return None;
                }
                let info = item.keyword_info.unwrap_or(KeywordInfo {
                    search_volume: None,
                    competition: None,
                    competition_level: None,
                });
                let competition_ratio = info.competition.unwrap_or(0.0);
                let competition_level = info.competition_level.unwrap_or_else(|| "LOW".to_string());
                if competition_level != "LOW" && competition_level != "MEDIUM" {
                    return None;
                }
                // Ads competition above 0.6 correlates with unrankable terms.
                if competition_ratio * 100.0 >= 60.0 {
                    return None;
                }
                Some(KeywordSuggestion {
                    keyword,
                    search_volume: info.search_volume.unwrap_or(0),
                    competition_ratio,
                    competition_level,
                })
            })
            .collect())
    }

    async fn bulk_keyword_difficulty(
        &self,
        keywords: &[String],
        location_code: u32,
        language_code: &str,
    ) -> Result<Vec<KeywordDifficulty>, ResearchError> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let body = json!([{
            "keywords": keywords,
            "location_code": location_code,
            "language_code": language_code
        }]);

        let items: Vec<DifficultyItem> = self.post(DIFFICULTY_ENDPOINT, &body).await?;
        debug!(
            "bulk difficulty call returned {}/{} scores",
            items.len(),
            keywords.len()
        );

        Ok(items
            .into_iter()
            .filter_map(|item| {
                let keyword = item.keyword?.trim().to_string();
                // Items without a difficulty score are useless downstream.
                let difficulty = item.keyword_difficulty?;
                Some(KeywordDifficulty {
                    keyword,
                    difficulty,
                    search_volume: item.search_volume.unwrap_or(0),
                })
            })
            .collect())
    }
}
