//! Calendar allocator — picks unused keywords from the pool and schedules one
//! per day.
//!
//! Selection is randomized within a top-scoring window so repeated calendars
//! for similar pools do not come out identical, while still favoring the best
//! keywords. All keyword state transitions happen inside one transaction
//! under a per-website advisory lock.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::calendar::GenerationState;
use crate::models::keyword::ConsumptionState;

/// Knobs of the allocation strategy.
#[derive(Debug, Clone)]
pub struct AllocatorTuning {
    /// Random selection happens within the top N keywords by score.
    pub selection_window: usize,
    /// Unique-constraint conflicts are retried this many times before the
    /// request gives up with a conflict error.
    pub conflict_retries: u32,
}

impl Default for AllocatorTuning {
    fn default() -> Self {
        Self {
            selection_window: 20,
            conflict_retries: 3,
        }
    }
}

/// An unused pool keyword eligible for assignment.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AvailableKeyword {
    pub id: Uuid,
    pub keyword: String,
    pub search_volume: i64,
    pub seo_difficulty: i32,
    pub score: i32,
}

/// One planned calendar entry, produced by the pure planner before anything
/// touches the database.
#[derive(Debug, Clone)]
pub struct PlannedAssignment {
    pub keyword_id: Uuid,
    pub target_keyword: String,
    pub scheduled_date: NaiveDate,
    pub title: String,
}

/// Assigns up to `num_days` consecutive dates starting at `start_date`.
///
/// Returns the number of entries actually created, which is less than
/// `num_days` when the pool runs dry (partial fulfillment, not an error).
pub async fn assign(
    db: &PgPool,
    website_id: Uuid,
    start_date: NaiveDate,
    num_days: u32,
    tuning: &AllocatorTuning,
) -> Result<usize, AppError> {
    if num_days == 0 {
        return Err(AppError::Validation(
            "num_days must be at least 1".to_string(),
        ));
    }

    let mut attempt = 0;
    loop {
        match try_assign(db, website_id, start_date, num_days, tuning).await {
            Ok(assigned) => return Ok(assigned),
            Err(AppError::Database(e)) if is_unique_violation(&e) => {
                attempt += 1;
                if attempt > tuning.conflict_retries {
                    return Err(AppError::Conflict(format!(
                        "calendar for website {website_id} changed concurrently, please retry"
                    )));
                }
                warn!(
                    "calendar assignment conflict for {website_id}, retry {attempt}/{}",
                    tuning.conflict_retries
                );
            }
            Err(e) => return Err(e),
        }
    }
}

async fn try_assign(
    db: &PgPool,
    website_id: Uuid,
    start_date: NaiveDate,
    num_days: u32,
    tuning: &AllocatorTuning,
) -> Result<usize, AppError> {
    let mut tx = db.begin().await?;
    lock_website(&mut tx, website_id).await?;

    let available = load_unused_keywords(&mut tx, website_id).await?;
    if available.is_empty() {
        return Err(AppError::NoAvailableKeywords);
    }
    if (available.len() as u32) < num_days {
        warn!(
            "website {website_id} has {} unused keywords for {num_days} requested days",
            available.len()
        );
    }

    // The rng must not live across an await.
    let plans = {
        let mut rng = rand::rng();
        plan_assignments(
            available,
            start_date,
            num_days,
            tuning.selection_window,
            &mut rng,
        )
    };

    let mut assigned_ids: Vec<Uuid> = Vec::with_capacity(plans.len());
    for plan in &plans {
        sqlx::query(
            "INSERT INTO content_plan \
             (id, website_id, keyword_id, target_keyword, scheduled_date, title, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(Uuid::new_v4())
        .bind(website_id)
        .bind(plan.keyword_id)
        .bind(&plan.target_keyword)
        .bind(plan.scheduled_date)
        .bind(&plan.title)
        .bind(GenerationState::Planned.as_str())
        .execute(&mut *tx)
        .await?;
        assigned_ids.push(plan.keyword_id);
    }

    sqlx::query("UPDATE keywords SET consumption_state = $1 WHERE id = ANY($2)")
        .bind(ConsumptionState::Assigned.as_str())
        .bind(&assigned_ids)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!(
        "assigned {} calendar entries for website {website_id} from {start_date}",
        plans.len()
    );
    Ok(plans.len())
}

/// Serializes calendar writes per website. Advisory, transaction-scoped, so
/// it releases automatically on commit or rollback.
pub(crate) async fn lock_website(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    website_id: Uuid,
) -> Result<(), AppError> {
    // hashtextextended wants text, so the uuid goes over as its string form.
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
        .bind(website_id.to_string())
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Unused keywords for a website, best score first. "Unused" is derived from
/// the absence of a content_plan row, not trusted from consumption_state,
/// so a missed state update can never double-assign a keyword.
pub(crate) async fn load_unused_keywords(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    website_id: Uuid,
) -> Result<Vec<AvailableKeyword>, AppError> {
    let rows = sqlx::query_as::<_, AvailableKeyword>(
        "SELECT k.id, k.keyword, k.search_volume, k.seo_difficulty, k.score \
         FROM keywords k \
         WHERE k.website_id = $1 \
           AND NOT EXISTS (SELECT 1 FROM content_plan cp WHERE cp.keyword_id = k.id) \
         ORDER BY k.score DESC, k.created_at ASC",
    )
    .bind(website_id)
    .fetch_all(&mut **tx)
    .await?;
    Ok(rows)
}

/// Pure planning step: one keyword per consecutive date, each picked
/// uniformly from the top `selection_window` remaining keywords.
pub(crate) fn plan_assignments(
    mut available: Vec<AvailableKeyword>,
    start_date: NaiveDate,
    num_days: u32,
    selection_window: usize,
    rng: &mut impl Rng,
) -> Vec<PlannedAssignment> {
    let effective_days = (num_days as usize).min(available.len());
    let mut plans = Vec::with_capacity(effective_days);

    for offset in 0..effective_days {
        // window is at least 1 so a zero tuning value cannot empty the
        // random range
        let window = selection_window.max(1).min(available.len());
        let picked = available.remove(rng.random_range(0..window));
        plans.push(PlannedAssignment {
            title: derive_title(&picked.keyword),
            keyword_id: picked.id,
            target_keyword: picked.keyword,
            scheduled_date: start_date + Duration::days(offset as i64),
        });
    }

    plans
}

/// Working title for a planned article. The first letter is capitalized, the
/// rest of the keyword is kept as typed.
pub(crate) fn derive_title(keyword: &str) -> String {
    let mut chars = keyword.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("The Complete Guide to {capitalized}")
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
