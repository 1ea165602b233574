//! Keyword swap for an existing calendar entry.
//!
//! Picks a replacement uniformly from ALL unused keywords, not just the top
//! window: the user is rejecting the scored ranking's pick, so the swap
//! deliberately widens the choice instead of re-offering a near-identical
//! keyword. The replaced keyword goes back to the unused pool in the same
//! transaction.

use rand::Rng;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calendar::allocator::{
    derive_title, is_unique_violation, load_unused_keywords, lock_website, AllocatorTuning,
    AvailableKeyword,
};
use crate::errors::AppError;
use crate::models::calendar::ContentPlanRow;
use crate::models::keyword::ConsumptionState;

/// What the handler returns after a successful swap.
#[derive(Debug, Serialize)]
pub struct KeywordChange {
    pub content_plan_id: Uuid,
    pub title: String,
    pub keyword: String,
    pub search_volume: i64,
    pub difficulty: i32,
}

/// Pure selection step for a swap: the replacement keyword, its derived
/// title, and the id the transaction must release back to `unused`.
#[derive(Debug)]
pub(crate) struct PlannedSwap {
    pub replacement: AvailableKeyword,
    pub released_keyword_id: Uuid,
    pub title: String,
}

pub async fn change_keyword(
    db: &PgPool,
    content_plan_id: Uuid,
    tuning: &AllocatorTuning,
) -> Result<KeywordChange, AppError> {
    let mut attempt = 0;
    loop {
        match try_change(db, content_plan_id).await {
            Ok(change) => return Ok(change),
            Err(AppError::Database(e)) if is_unique_violation(&e) => {
                attempt += 1;
                if attempt > tuning.conflict_retries {
                    return Err(AppError::Conflict(format!(
                        "calendar entry {content_plan_id} changed concurrently, please retry"
                    )));
                }
                warn!(
                    "keyword change conflict for {content_plan_id}, retry {attempt}/{}",
                    tuning.conflict_retries
                );
            }
            Err(e) => return Err(e),
        }
    }
}

async fn try_change(db: &PgPool, content_plan_id: Uuid) -> Result<KeywordChange, AppError> {
    let mut tx = db.begin().await?;

    // First read only locates the website for the lock. The keyword_id seen
    // here may be stale: a concurrent swap on the same entry can commit
    // between this read and lock acquisition.
    let website_id: Uuid =
        sqlx::query_scalar("SELECT website_id FROM content_plan WHERE id = $1")
            .bind(content_plan_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("content plan entry {content_plan_id}")))?;

    lock_website(&mut tx, website_id).await?;

    // Authoritative read, under the lock. Releasing a keyword_id read before
    // the lock would strand a concurrent caller's replacement as
    // assigned-but-unreferenced.
    let plan = sqlx::query_as::<_, ContentPlanRow>(
        "SELECT id, website_id, keyword_id, target_keyword, scheduled_date, title, status, \
         created_at FROM content_plan WHERE id = $1",
    )
    .bind(content_plan_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("content plan entry {content_plan_id}")))?;

    let available = load_unused_keywords(&mut tx, website_id).await?;

    // rng scoped before the awaits
    let swap = {
        let mut rng = rand::rng();
        plan_swap(plan.keyword_id, &available, &mut rng)
    }
    .ok_or(AppError::NoUnusedKeywords)?;

    sqlx::query(
        "UPDATE content_plan SET keyword_id = $1, target_keyword = $2, title = $3 WHERE id = $4",
    )
    .bind(swap.replacement.id)
    .bind(&swap.replacement.keyword)
    .bind(&swap.title)
    .bind(content_plan_id)
    .execute(&mut *tx)
    .await?;

    // The old keyword is released, the new one consumed.
    sqlx::query("UPDATE keywords SET consumption_state = $1 WHERE id = $2")
        .bind(ConsumptionState::Unused.as_str())
        .bind(swap.released_keyword_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE keywords SET consumption_state = $1 WHERE id = $2")
        .bind(ConsumptionState::Assigned.as_str())
        .bind(swap.replacement.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!(
        "swapped keyword for calendar entry {content_plan_id}: '{}' -> '{}'",
        plan.target_keyword, swap.replacement.keyword
    );

    Ok(KeywordChange {
        content_plan_id,
        title: swap.title,
        keyword: swap.replacement.keyword,
        search_volume: swap.replacement.search_volume,
        difficulty: swap.replacement.seo_difficulty,
    })
}

/// Uniform pick over the whole unused pool. `current_keyword_id` is what the
/// calendar entry holds right now; it is never in `available` (it has a
/// content_plan row), so the replacement always differs from it. Returns
/// `None` when the pool is fully consumed.
pub(crate) fn plan_swap(
    current_keyword_id: Uuid,
    available: &[AvailableKeyword],
    rng: &mut impl Rng,
) -> Option<PlannedSwap> {
    if available.is_empty() {
        return None;
    }
    let replacement = available[rng.random_range(0..available.len())].clone();
    Some(PlannedSwap {
        title: derive_title(&replacement.keyword),
        released_keyword_id: current_keyword_id,
        replacement,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
