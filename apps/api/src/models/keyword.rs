use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Consumption lifecycle of a pool keyword.
///
/// The transition `unused → assigned` happens exactly once, when an
/// allocator run claims the keyword. The only path back is the
/// change-keyword swap, which releases the replaced keyword inside the same
/// transaction that claims its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionState {
    Unused,
    Assigned,
}

impl ConsumptionState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsumptionState::Unused => "unused",
            ConsumptionState::Assigned => "assigned",
        }
    }
}

/// A researched candidate keyword persisted into a website's pool.
/// Immutable after insert except for `consumption_state`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PoolKeywordRow {
    pub id: Uuid,
    pub website_id: Uuid,
    pub keyword: String,
    pub search_volume: i64,
    pub ads_competition: f64,
    pub seo_difficulty: i32,
    pub score: i32,
    /// Which seed keyword this candidate was discovered from.
    pub seed_keyword: String,
    pub consumption_state: String,
    pub created_at: DateTime<Utc>,
}
