//! Persistence for researched keywords.
//!
//! Inserts are idempotent per (website, lowercased keyword): re-running
//! research for a website only adds keywords it has not seen before, so a
//! retried onboarding never duplicates the pool.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::keyword::{ConsumptionState, PoolKeywordRow};
use crate::research::engine::KeywordCandidate;

/// Maps a candidate back to the seed that most plausibly produced it:
/// the first seed contained in the keyword, else the first seed.
pub(crate) fn attribute_seed<'a>(keyword: &str, seeds: &'a [String]) -> Option<&'a str> {
    let lowered = keyword.to_lowercase();
    seeds
        .iter()
        .find(|seed| lowered.contains(&seed.to_lowercase()))
        .or_else(|| seeds.first())
        .map(String::as_str)
}

/// Inserts candidates into the pool, skipping ones the website already has.
/// Returns how many rows were actually inserted.
pub async fn insert_keyword_pool(
    db: &PgPool,
    website_id: Uuid,
    candidates: &[KeywordCandidate],
    seeds: &[String],
) -> Result<usize, AppError> {
    let mut tx = db.begin().await?;
    let mut inserted = 0usize;

    for candidate in candidates {
        let result = sqlx::query(
            "INSERT INTO keywords \
             (id, website_id, keyword, search_volume, ads_competition, seo_difficulty, \
              score, seed_keyword, consumption_state) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (website_id, lower(keyword)) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(website_id)
        .bind(&candidate.keyword)
        .bind(candidate.search_volume)
        .bind(candidate.competition_ratio)
        .bind(candidate.difficulty)
        .bind(candidate.score)
        .bind(attribute_seed(&candidate.keyword, seeds))
        .bind(ConsumptionState::Unused.as_str())
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected() as usize;
    }

    tx.commit().await?;
    info!(
        "pool insert for website {website_id}: {inserted} new of {} candidates",
        candidates.len()
    );
    Ok(inserted)
}

/// Keywords still available for scheduling. Derived from content_plan
/// absence, same rule the allocator uses.
pub async fn unused_keyword_count(db: &PgPool, website_id: Uuid) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM keywords k \
         WHERE k.website_id = $1 \
           AND NOT EXISTS (SELECT 1 FROM content_plan cp WHERE cp.keyword_id = k.id)",
    )
    .bind(website_id)
    .fetch_one(db)
    .await?;
    Ok(count)
}

/// Full pool listing for a website, best score first.
pub async fn list_keywords(db: &PgPool, website_id: Uuid) -> Result<Vec<PoolKeywordRow>, AppError> {
    let rows = sqlx::query_as::<_, PoolKeywordRow>(
        "SELECT * FROM keywords WHERE website_id = $1 ORDER BY score DESC, created_at ASC",
    )
    .bind(website_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_attribute_seed_matches_substring_case_insensitive() {
        let seeds = seeds(&["React", "vue"]);
        assert_eq!(attribute_seed("react tutorial", &seeds), Some("React"));
        assert_eq!(attribute_seed("best Vue course", &seeds), Some("vue"));
    }

    #[test]
    fn test_attribute_seed_falls_back_to_first_seed() {
        let seeds = seeds(&["react", "vue"]);
        assert_eq!(attribute_seed("svelte guide", &seeds), Some("react"));
    }

    #[test]
    fn test_attribute_seed_empty_seed_list() {
        assert_eq!(attribute_seed("anything", &[]), None);
    }
}
