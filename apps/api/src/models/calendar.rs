use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Whether an article has been generated for a calendar slot yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    Planned,
    ArticleGenerated,
}

impl GenerationState {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationState::Planned => "planned",
            GenerationState::ArticleGenerated => "article_generated",
        }
    }
}

/// One keyword assigned to one calendar date.
///
/// `scheduled_date` is a pure date on purpose: storing a timestamp here
/// caused off-by-one days for users west of UTC in earlier designs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentPlanRow {
    pub id: Uuid,
    pub website_id: Uuid,
    pub keyword_id: Uuid,
    /// Denormalized copy of the keyword for display without a join.
    pub target_keyword: String,
    pub scheduled_date: NaiveDate,
    pub title: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
