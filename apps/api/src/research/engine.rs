//! Keyword Research Engine — turns a handful of seed keywords into a scored,
//! filtered, ranked candidate list.
//!
//! Pipeline: validate seeds → expand (best-effort) → fetch suggestions per
//! seed → dedup → bulk difficulty → score → threshold filter → stable sort.
//!
//! Every external stage has a degraded fallback; the engine never fails
//! because a remote service is down, only because its input is invalid. All
//! persistence happens in the caller.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::research::client::{KeywordSuggestion, ResearchError, ResearchProvider};
use crate::research::expander::SeedExpander;
use crate::research::mock;

/// Tunable knobs of the research pipeline. Defaults reproduce production
/// behavior; tests shrink the delays and widen the thresholds.
#[derive(Debug, Clone)]
pub struct ResearchTuning {
    /// Candidates at or above this difficulty are dropped.
    pub difficulty_threshold: i32,
    /// Hard cap on suggestions requested per seed.
    pub per_seed_cap: usize,
    pub min_seeds: usize,
    pub max_seeds: usize,
    /// Seed sets smaller than this get LLM expansion.
    pub expansion_floor: usize,
    /// Provider limit on keywords per bulk difficulty call.
    pub bulk_difficulty_limit: usize,
    /// Difficulty assumed when the bulk call succeeds but lacks a keyword.
    pub default_difficulty: i32,
    pub location_code: u32,
    pub language_code: String,
    /// Courtesy delay between per-seed suggestion calls.
    pub inter_call_delay: Duration,
    /// Per-external-call timeout; expiry takes the degraded branch.
    pub call_timeout: Duration,
}

impl Default for ResearchTuning {
    fn default() -> Self {
        Self {
            difficulty_threshold: 35,
            per_seed_cap: 100,
            min_seeds: 3,
            max_seeds: 15,
            expansion_floor: 5,
            bulk_difficulty_limit: 1000,
            default_difficulty: 50,
            location_code: 2840, // United States
            language_code: "en".to_string(),
            inter_call_delay: Duration::from_millis(200),
            call_timeout: Duration::from_secs(30),
        }
    }
}

/// A scored candidate keyword. Ephemeral: exists only between a research run
/// and the pool insert.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordCandidate {
    pub keyword: String,
    pub search_volume: i64,
    pub competition_ratio: f64,
    pub difficulty: i32,
    pub score: i32,
}

/// Which pipeline stages ran on synthesized data instead of the real
/// service. Surfaced so operators can tell degraded results from real ones.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DegradedStages {
    pub expansion: bool,
    pub suggestions: bool,
    pub difficulty: bool,
}

impl DegradedStages {
    pub fn any(self) -> bool {
        self.expansion || self.suggestions || self.difficulty
    }
}

#[derive(Debug)]
pub struct ResearchOutcome {
    /// Sorted descending by score; ties keep arrival order.
    pub candidates: Vec<KeywordCandidate>,
    pub degraded: DegradedStages,
}

pub struct KeywordResearchEngine {
    provider: Arc<dyn ResearchProvider>,
    expander: Arc<dyn SeedExpander>,
    tuning: ResearchTuning,
}

impl KeywordResearchEngine {
    pub fn new(
        provider: Arc<dyn ResearchProvider>,
        expander: Arc<dyn SeedExpander>,
        tuning: ResearchTuning,
    ) -> Self {
        Self {
            provider,
            expander,
            tuning,
        }
    }

    /// Runs the full research pipeline.
    ///
    /// An empty candidate list is a valid outcome (nothing passed the
    /// difficulty filter) — callers decide how to report it.
    pub async fn research(
        &self,
        seed_keywords: &[String],
        target_audience: &str,
        max_candidates: usize,
    ) -> Result<ResearchOutcome, AppError> {
        let mut seeds: Vec<String> = seed_keywords
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if seeds.len() < self.tuning.min_seeds {
            return Err(AppError::Validation(format!(
                "need at least {} non-empty seed keywords, got {}",
                self.tuning.min_seeds,
                seeds.len()
            )));
        }
        if seeds.len() > self.tuning.max_seeds {
            return Err(AppError::Validation(format!(
                "at most {} seed keywords allowed, got {}",
                self.tuning.max_seeds,
                seeds.len()
            )));
        }

        let mut degraded = DegradedStages::default();

        // Stage 0: expansion, only for under-sized seed sets. Never fatal.
        if seeds.len() < self.tuning.expansion_floor {
            match timeout(
                self.tuning.call_timeout,
                self.expander.expand(&seeds, target_audience),
            )
            .await
            {
                Ok(Ok(extra)) => {
                    info!("expanded {} seeds with {} related terms", seeds.len(), extra.len());
                    seeds.extend(extra);
                }
                Ok(Err(e)) => {
                    warn!("seed expansion failed, continuing with original seeds: {e}");
                    degraded.expansion = true;
                }
                Err(_) => {
                    warn!("seed expansion timed out, continuing with original seeds");
                    degraded.expansion = true;
                }
            }
        }

        // Stage 1: per-seed suggestion retrieval. Whole-stage fallback to
        // template data on any failure.
        let per_seed_limit = self
            .tuning
            .per_seed_cap
            .min(max_candidates.div_ceil(seeds.len()));
        let suggestions = match self.fetch_suggestions(&seeds, per_seed_limit).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("suggestion retrieval failed, falling back to template suggestions: {e}");
                degraded.suggestions = true;
                mock::mock_suggestions(&seeds)
            }
        };

        // Stage 2: normalize, dedup, keep the highest-volume slice.
        let kept = normalize_suggestions(suggestions, max_candidates);

        // Stage 3: difficulty enrichment, synthesized on failure.
        let keywords: Vec<String> = kept.iter().map(|s| s.keyword.clone()).collect();
        let difficulty_rows = match self.fetch_difficulty(&keywords).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("bulk difficulty failed, synthesizing scores: {e}");
                degraded.difficulty = true;
                let mut rng = rand::rng();
                mock::synthesized_difficulty(&keywords, &mut rng)
            }
        };
        let difficulty_by_keyword: HashMap<String, i32> = difficulty_rows
            .into_iter()
            .map(|row| (row.keyword.to_lowercase(), row.difficulty))
            .collect();

        // Stages 4–6: score, filter, rank. The sort must be stable so equal
        // scores keep their arrival order.
        let mut candidates: Vec<KeywordCandidate> = kept
            .into_iter()
            .map(|suggestion| {
                let difficulty = difficulty_by_keyword
                    .get(&suggestion.keyword.to_lowercase())
                    .copied()
                    .unwrap_or(self.tuning.default_difficulty);
                KeywordCandidate {
                    score: compute_score(suggestion.search_volume, difficulty),
                    keyword: suggestion.keyword,
                    search_volume: suggestion.search_volume,
                    competition_ratio: suggestion.competition_ratio,
                    difficulty,
                }
            })
            .filter(|candidate| candidate.difficulty < self.tuning.difficulty_threshold)
            .collect();
        candidates.sort_by(|a, b| b.score.cmp(&a.score));

        if candidates.is_empty() {
            warn!(
                "research produced no keywords under difficulty {}",
                self.tuning.difficulty_threshold
            );
        } else {
            info!(
                "research produced {} candidates (degraded: {})",
                candidates.len(),
                degraded.any()
            );
        }

        Ok(ResearchOutcome {
            candidates,
            degraded,
        })
    }

    /// Sequential per-seed fetch with a courtesy delay between calls.
    /// Any single failure fails the stage — the caller degrades wholesale.
    async fn fetch_suggestions(
        &self,
        seeds: &[String],
        limit: usize,
    ) -> Result<Vec<KeywordSuggestion>, ResearchError> {
        let mut all = Vec::new();
        for (i, seed) in seeds.iter().enumerate() {
            if i > 0 && !self.tuning.inter_call_delay.is_zero() {
                tokio::time::sleep(self.tuning.inter_call_delay).await;
            }
            let batch = timeout(
                self.tuning.call_timeout,
                self.provider.keyword_suggestions(
                    seed,
                    limit,
                    self.tuning.location_code,
                    &self.tuning.language_code,
                ),
            )
            .await
            .map_err(|_| ResearchError::Timeout)??;
            all.extend(batch);
        }
        Ok(all)
    }

    /// Bulk difficulty, chunked to the provider's per-call keyword limit.
    async fn fetch_difficulty(
        &self,
        keywords: &[String],
    ) -> Result<Vec<crate::research::client::KeywordDifficulty>, ResearchError> {
        let mut all = Vec::new();
        for chunk in keywords.chunks(self.tuning.bulk_difficulty_limit) {
            let batch = timeout(
                self.tuning.call_timeout,
                self.provider.bulk_keyword_difficulty(
                    chunk,
                    self.tuning.location_code,
                    &self.tuning.language_code,
                ),
            )
            .await
            .map_err(|_| ResearchError::Timeout)??;
            all.extend(batch);
        }
        Ok(all)
    }
}

/// Trims, drops empties, collapses case-insensitive duplicates (first
/// occurrence wins), sorts descending by volume, and truncates.
fn normalize_suggestions(
    suggestions: Vec<KeywordSuggestion>,
    max_candidates: usize,
) -> Vec<KeywordSuggestion> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique: Vec<KeywordSuggestion> = Vec::new();

    for mut suggestion in suggestions {
        suggestion.keyword = suggestion.keyword.trim().to_string();
        if suggestion.keyword.is_empty() {
            continue;
        }
        if seen.insert(suggestion.keyword.to_lowercase()) {
            unique.push(suggestion);
        }
    }

    // Stable: equal volumes keep arrival order.
    unique.sort_by(|a, b| b.search_volume.cmp(&a.search_volume));
    unique.truncate(max_candidates);
    unique
}

/// `min(volume/50, 100) + max(100 - difficulty, 0)`, rounded.
///
/// Rewards high volume and low difficulty symmetrically; the volume cap
/// keeps one viral keyword from dominating the ranking.
fn compute_score(search_volume: i64, difficulty: i32) -> i32 {
    let volume_score = (search_volume as f64 / 50.0).min(100.0);
    let difficulty_score = f64::from(100 - difficulty).max(0.0);
    (volume_score + difficulty_score).round() as i32
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::*;
    use crate::research::client::KeywordDifficulty;

    struct FakeProvider {
        per_seed: HashMap<String, Vec<KeywordSuggestion>>,
        difficulties: Vec<KeywordDifficulty>,
        fail_suggestions: bool,
        fail_difficulty: bool,
        suggestion_calls: AtomicUsize,
        difficulty_calls: AtomicUsize,
        limits_seen: Mutex<Vec<usize>>,
    }

    impl FakeProvider {
        fn new() -> Self {
            Self {
                per_seed: HashMap::new(),
                difficulties: Vec::new(),
                fail_suggestions: false,
                fail_difficulty: false,
                suggestion_calls: AtomicUsize::new(0),
                difficulty_calls: AtomicUsize::new(0),
                limits_seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ResearchProvider for FakeProvider {
        async fn keyword_suggestions(
            &self,
            seed: &str,
            limit: usize,
            _location_code: u32,
            _language_code: &str,
        ) -> Result<Vec<KeywordSuggestion>, ResearchError> {
            self.suggestion_calls.fetch_add(1, Ordering::SeqCst);
            self.limits_seen.lock().unwrap().push(limit);
            if self.fail_suggestions {
                return Err(ResearchError::Api {
                    status: 50000,
                    message: "down".to_string(),
                });
            }
            Ok(self.per_seed.get(seed).cloned().unwrap_or_default())
        }

        async fn bulk_keyword_difficulty(
            &self,
            keywords: &[String],
            _location_code: u32,
            _language_code: &str,
        ) -> Result<Vec<KeywordDifficulty>, ResearchError> {
            self.difficulty_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_difficulty {
                return Err(ResearchError::Timeout);
            }
            let requested: HashSet<&str> = keywords.iter().map(|k| k.as_str()).collect();
            Ok(self
                .difficulties
                .iter()
                .filter(|d| requested.contains(d.keyword.as_str()))
                .cloned()
                .collect())
        }
    }

    struct FixedExpander {
        terms: Vec<String>,
    }

    impl FixedExpander {
        fn new(terms: &[&str]) -> Self {
            Self {
                terms: terms.iter().map(|t| t.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl SeedExpander for FixedExpander {
        async fn expand(&self, _seeds: &[String], _audience: &str) -> anyhow::Result<Vec<String>> {
            Ok(self.terms.clone())
        }
    }

    struct FailingExpander;

    #[async_trait]
    impl SeedExpander for FailingExpander {
        async fn expand(&self, _seeds: &[String], _audience: &str) -> anyhow::Result<Vec<String>> {
            Err(anyhow!("llm unavailable"))
        }
    }

    fn test_tuning() -> ResearchTuning {
        ResearchTuning {
            inter_call_delay: Duration::ZERO,
            call_timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    fn suggestion(keyword: &str, volume: i64) -> KeywordSuggestion {
        KeywordSuggestion {
            keyword: keyword.to_string(),
            search_volume: volume,
            competition_ratio: 0.2,
            competition_level: "LOW".to_string(),
        }
    }

    fn difficulty(keyword: &str, value: i32) -> KeywordDifficulty {
        KeywordDifficulty {
            keyword: keyword.to_string(),
            difficulty: value,
            search_volume: 0,
        }
    }

    fn seeds(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn engine_with(
        provider: FakeProvider,
        expander: impl SeedExpander + 'static,
        tuning: ResearchTuning,
    ) -> (KeywordResearchEngine, Arc<FakeProvider>) {
        let provider = Arc::new(provider);
        let engine =
            KeywordResearchEngine::new(provider.clone(), Arc::new(expander), tuning);
        (engine, provider)
    }

    #[tokio::test]
    async fn test_fewer_than_three_seeds_rejected_without_external_calls() {
        let (engine, provider) =
            engine_with(FakeProvider::new(), FixedExpander::new(&[]), test_tuning());

        let result = engine.research(&seeds(&["react", "  "]), "devs", 200).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(provider.suggestion_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.difficulty_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_more_than_fifteen_seeds_rejected() {
        let (engine, _) =
            engine_with(FakeProvider::new(), FixedExpander::new(&[]), test_tuning());
        let many: Vec<String> = (0..16).map(|i| format!("seed {i}")).collect();

        let result = engine.research(&many, "devs", 200).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_score_formula_worked_example() {
        // volume 2500, difficulty 20: min(50, 100) + max(80, 0) = 130
        assert_eq!(compute_score(2500, 20), 130);
    }

    #[test]
    fn test_score_volume_capped_at_100() {
        assert_eq!(compute_score(1_000_000, 0), 200);
    }

    #[test]
    fn test_score_difficulty_floor_at_zero() {
        // difficulty > 100 cannot push the score negative
        assert_eq!(compute_score(0, 150), 0);
    }

    #[test]
    fn test_score_rounds_half_up() {
        // 25/50 = 0.5 volume + 20 difficulty → 20.5 → 21
        assert_eq!(compute_score(25, 80), 21);
    }

    #[test]
    fn test_normalize_dedups_case_insensitive_keeping_first() {
        let kept = normalize_suggestions(
            vec![
                suggestion("Rust Guide", 100),
                suggestion("rust guide", 9000),
                suggestion("other", 50),
            ],
            10,
        );
        assert_eq!(kept.len(), 2);
        // First occurrence wins, even when the duplicate has more volume.
        assert_eq!(kept[0].keyword, "Rust Guide");
        assert_eq!(kept[0].search_volume, 100);
    }

    #[test]
    fn test_normalize_sorts_by_volume_and_truncates() {
        let kept = normalize_suggestions(
            vec![
                suggestion("low", 10),
                suggestion("high", 5000),
                suggestion("mid", 300),
            ],
            2,
        );
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].keyword, "high");
        assert_eq!(kept[1].keyword, "mid");
    }

    #[tokio::test]
    async fn test_output_filtered_below_threshold_and_sorted_by_score() {
        // 3 seeds × 15 suggestions, volumes 100–4600, difficulties 10–80.
        let mut provider = FakeProvider::new();
        let seed_names = ["react", "nextjs", "typescript"];
        let mut expected_under_threshold = 0;
        for (s, seed) in seed_names.iter().enumerate() {
            let mut batch = Vec::new();
            for j in 0..15 {
                let idx = s * 15 + j;
                let keyword = format!("{seed} idea {j}");
                let volume = 100 + (idx as i64) * 100;
                let diff = 10 + ((idx * 7) % 71) as i32; // 10..=80
                if diff < 35 {
                    expected_under_threshold += 1;
                }
                batch.push(suggestion(&keyword, volume));
                provider.difficulties.push(difficulty(&keyword, diff));
            }
            provider.per_seed.insert(seed.to_string(), batch);
        }

        // 5th seed not needed: skip expansion by using a no-op expander and
        // asserting it is tolerated (3 seeds still triggers it, returns 0).
        let (engine, _) = engine_with(provider, FixedExpander::new(&[]), test_tuning());
        let outcome = engine
            .research(&seeds(&seed_names), "developers", 200)
            .await
            .unwrap();

        assert_eq!(outcome.candidates.len(), expected_under_threshold);
        assert!(outcome.candidates.iter().all(|c| c.difficulty < 35));
        assert!(outcome
            .candidates
            .windows(2)
            .all(|w| w[0].score >= w[1].score));

        // No case-insensitive duplicates survive.
        let mut lowered: Vec<String> = outcome
            .candidates
            .iter()
            .map(|c| c.keyword.to_lowercase())
            .collect();
        let before = lowered.len();
        lowered.sort();
        lowered.dedup();
        assert_eq!(lowered.len(), before);
        assert!(!outcome.degraded.any());
    }

    #[tokio::test]
    async fn test_equal_scores_keep_arrival_order() {
        let mut provider = FakeProvider::new();
        // Same volume and difficulty → identical score. "alpha" arrives first.
        provider.per_seed.insert(
            "a".to_string(),
            vec![suggestion("alpha", 1000), suggestion("beta", 1000)],
        );
        provider.per_seed.insert("b".to_string(), vec![]);
        provider.per_seed.insert("c".to_string(), vec![]);
        provider.difficulties =
            vec![difficulty("alpha", 20), difficulty("beta", 20)];

        let (engine, _) =
            engine_with(provider, FixedExpander::new(&[]), test_tuning());
        let outcome = engine
            .research(&seeds(&["a", "b", "c"]), "devs", 200)
            .await
            .unwrap();

        assert_eq!(outcome.candidates.len(), 2);
        assert_eq!(outcome.candidates[0].score, outcome.candidates[1].score);
        assert_eq!(outcome.candidates[0].keyword, "alpha");
        assert_eq!(outcome.candidates[1].keyword, "beta");
    }

    #[tokio::test]
    async fn test_expander_failure_is_non_fatal() {
        let mut provider = FakeProvider::new();
        provider
            .per_seed
            .insert("a".to_string(), vec![suggestion("a guide", 500)]);
        provider.per_seed.insert("b".to_string(), vec![]);
        provider.per_seed.insert("c".to_string(), vec![]);
        provider.difficulties = vec![difficulty("a guide", 10)];

        let (engine, provider) = engine_with(provider, FailingExpander, test_tuning());
        let outcome = engine
            .research(&seeds(&["a", "b", "c"]), "devs", 200)
            .await
            .unwrap();

        assert!(outcome.degraded.expansion);
        assert_eq!(outcome.candidates.len(), 1);
        // Only the original three seeds were queried.
        assert_eq!(provider.suggestion_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_expansion_terms_are_queried_too() {
        let mut provider = FakeProvider::new();
        for seed in ["a", "b", "c", "x", "y"] {
            provider.per_seed.insert(seed.to_string(), vec![]);
        }

        let (engine, provider) = engine_with(
            provider,
            FixedExpander::new(&["x", "y"]),
            test_tuning(),
        );
        let _ = engine.research(&seeds(&["a", "b", "c"]), "devs", 200).await;

        assert_eq!(provider.suggestion_calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_expansion_skipped_at_five_seeds() {
        let mut provider = FakeProvider::new();
        for i in 0..5 {
            provider.per_seed.insert(format!("s{i}"), vec![]);
        }
        let expander = FixedExpander::new(&["should not appear"]);

        let (engine, provider) = engine_with(provider, expander, test_tuning());
        let _ = engine
            .research(&seeds(&["s0", "s1", "s2", "s3", "s4"]), "devs", 200)
            .await;

        // Expansion skipped, so exactly the five real seeds were queried and
        // the expander's marker term never reached the provider.
        assert_eq!(provider.suggestion_calls.load(Ordering::SeqCst), 5);
        let limits = provider.limits_seen.lock().unwrap();
        // ceil(200 / 5) = 40, under the 100 cap
        assert!(limits.iter().all(|&l| l == 40));
    }

    #[tokio::test]
    async fn test_suggestion_failure_degrades_to_templates() {
        let mut provider = FakeProvider::new();
        provider.fail_suggestions = true;
        provider.fail_difficulty = true;
        let tuning = ResearchTuning {
            difficulty_threshold: 101, // keep everything so we can inspect
            ..test_tuning()
        };

        let (engine, _) = engine_with(provider, FixedExpander::new(&[]), tuning);
        let outcome = engine
            .research(&seeds(&["react", "vue", "svelte"]), "devs", 200)
            .await
            .unwrap();

        assert!(outcome.degraded.suggestions);
        assert!(outcome.degraded.difficulty);
        assert!(!outcome.candidates.is_empty());
        assert!(outcome
            .candidates
            .iter()
            .any(|c| c.keyword == "react tutorial"));
        // Synthesized difficulty stays in its documented bounds.
        assert!(outcome
            .candidates
            .iter()
            .all(|c| (15..85).contains(&c.difficulty)));
    }

    #[tokio::test]
    async fn test_missing_difficulty_defaults_to_fifty() {
        let mut provider = FakeProvider::new();
        provider
            .per_seed
            .insert("a".to_string(), vec![suggestion("uncovered", 1000)]);
        provider.per_seed.insert("b".to_string(), vec![]);
        provider.per_seed.insert("c".to_string(), vec![]);
        // Bulk call succeeds but has no row for "uncovered".
        let tuning = ResearchTuning {
            difficulty_threshold: 101,
            ..test_tuning()
        };

        let (engine, _) = engine_with(provider, FixedExpander::new(&[]), tuning);
        let outcome = engine
            .research(&seeds(&["a", "b", "c"]), "devs", 200)
            .await
            .unwrap();

        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].difficulty, 50);
        assert!(!outcome.degraded.difficulty);
    }

    #[tokio::test]
    async fn test_everything_filtered_returns_empty_not_error() {
        let mut provider = FakeProvider::new();
        provider
            .per_seed
            .insert("a".to_string(), vec![suggestion("hard one", 9000)]);
        provider.per_seed.insert("b".to_string(), vec![]);
        provider.per_seed.insert("c".to_string(), vec![]);
        provider.difficulties = vec![difficulty("hard one", 90)];

        let (engine, _) =
            engine_with(provider, FixedExpander::new(&[]), test_tuning());
        let outcome = engine
            .research(&seeds(&["a", "b", "c"]), "devs", 200)
            .await
            .unwrap();

        assert!(outcome.candidates.is_empty());
    }
}
