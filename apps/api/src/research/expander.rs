//! Seed expansion — enriches an under-sized seed set with related terms.
//!
//! Best-effort by contract: the engine treats any failure here as "continue
//! with the original seeds", so implementations should fail fast rather than
//! retry aggressively.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::llm_client::LlmClient;
use crate::research::prompts::{SEED_EXPANSION_PROMPT, SEED_EXPANSION_SYSTEM};

/// How many expansion terms we keep at most, regardless of what the model
/// returns.
const MAX_EXPANSION_TERMS: usize = 3;

#[async_trait]
pub trait SeedExpander: Send + Sync {
    /// Returns additional seed terms related to the input set.
    /// Must not return duplicates of the existing seeds.
    async fn expand(&self, seeds: &[String], target_audience: &str) -> Result<Vec<String>>;
}

/// LLM-backed expander. Asks for a comma-separated list and parses it
/// defensively — models occasionally add whitespace or trailing commas.
pub struct LlmSeedExpander {
    llm: LlmClient,
}

impl LlmSeedExpander {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SeedExpander for LlmSeedExpander {
    async fn expand(&self, seeds: &[String], target_audience: &str) -> Result<Vec<String>> {
        let prompt = SEED_EXPANSION_PROMPT
            .replace("{seed_keywords}", &seeds.join(", "))
            .replace("{target_audience}", target_audience);

        let raw = self.llm.complete(&prompt, SEED_EXPANSION_SYSTEM).await?;
        let terms = parse_expansion(&raw, seeds);
        debug!("seed expansion produced {} new terms", terms.len());
        Ok(terms)
    }
}

/// Parses a comma-separated keyword list, dropping empties and anything
/// already present in the seed set (case-insensitive).
fn parse_expansion(raw: &str, existing: &[String]) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for part in raw.split(',') {
        let term = part.trim();
        if term.is_empty() {
            continue;
        }
        let lower = term.to_lowercase();
        let duplicate = existing.iter().any(|s| s.to_lowercase() == lower)
            || terms.iter().any(|t: &String| t.to_lowercase() == lower);
        if duplicate {
            continue;
        }
        terms.push(term.to_string());
        if terms.len() == MAX_EXPANSION_TERMS {
            break;
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_expansion_splits_and_trims() {
        let parsed = parse_expansion("rust web framework , async runtime,", &seeds(&["rust"]));
        assert_eq!(parsed, vec!["rust web framework", "async runtime"]);
    }

    #[test]
    fn test_parse_expansion_drops_existing_seeds() {
        let parsed = parse_expansion("Rust, tokio", &seeds(&["rust"]));
        assert_eq!(parsed, vec!["tokio"]);
    }

    #[test]
    fn test_parse_expansion_caps_at_three() {
        let parsed = parse_expansion("a, b, c, d, e", &seeds(&[]));
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_parse_expansion_dedupes_model_output() {
        let parsed = parse_expansion("tokio, Tokio, axum", &seeds(&[]));
        assert_eq!(parsed, vec!["tokio", "axum"]);
    }
}
