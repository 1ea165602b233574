//! Degraded-mode data sources.
//!
//! When the external keyword service is down the pipeline must still return
//! something usable, so suggestions fall back to template expansions of the
//! seeds and difficulty falls back to a bounded synthesized value. Callers
//! flag the degradation; these functions only produce the data.

use rand::Rng;

use crate::research::client::{KeywordDifficulty, KeywordSuggestion};

/// Long-tail templates applied to each seed when the suggestion service is
/// unavailable. `{seed}` fills the obvious slot.
const SUFFIX_TEMPLATES: [&str; 13] = [
    "tutorial",
    "guide",
    "examples",
    "tips",
    "for beginners",
    "vs",
    "course",
    "development",
    "framework",
    "library",
    "documentation",
    "features",
    "performance",
];

/// Builds deterministic template suggestions for every seed. Volumes and
/// competition come from a stable hash of the keyword so degraded runs are
/// reproducible and testable.
pub fn mock_suggestions(seeds: &[String]) -> Vec<KeywordSuggestion> {
    let mut suggestions = Vec::with_capacity(seeds.len() * (SUFFIX_TEMPLATES.len() + 2));

    for seed in seeds {
        let mut keywords: Vec<String> = SUFFIX_TEMPLATES
            .iter()
            .map(|suffix| format!("{seed} {suffix}"))
            .collect();
        keywords.push(format!("best {seed}"));
        keywords.push(format!("{seed} testing"));

        for keyword in keywords {
            let hash = stable_hash(&keyword);
            suggestions.push(KeywordSuggestion {
                search_volume: 500 + (hash % 10_000) as i64,
                competition_ratio: (hash % 80) as f64 / 100.0,
                competition_level: if hash % 2 == 0 { "LOW" } else { "MEDIUM" }.to_string(),
                keyword,
            });
        }
    }

    suggestions
}

/// Synthesizes a bounded pseudo-random difficulty per keyword when the bulk
/// difficulty service fails. Range matches what the real service returns for
/// mid-tail keywords.
pub fn synthesized_difficulty(keywords: &[String], rng: &mut impl Rng) -> Vec<KeywordDifficulty> {
    keywords
        .iter()
        .map(|keyword| KeywordDifficulty {
            keyword: keyword.clone(),
            difficulty: rng.random_range(15..85),
            search_volume: rng.random_range(500..5_500),
        })
        .collect()
}

/// FNV-1a. Stable across runs and platforms, unlike `DefaultHasher`.
fn stable_hash(s: &str) -> u64 {
    s.bytes().fold(0xcbf2_9ce4_8422_2325u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}
