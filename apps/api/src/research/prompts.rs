// Prompts for the seed-expansion LLM call.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

pub const SEED_EXPANSION_SYSTEM: &str = "You are an SEO keyword expert. \
    You respond with exactly what is asked for and nothing else.";

/// Placeholders: `{seed_keywords}`, `{target_audience}`.
pub const SEED_EXPANSION_PROMPT: &str = "\
    Given these seed keywords that represent a user's app/business: \"{seed_keywords}\"\n\
    \n\
    Target audience: {target_audience}\n\
    \n\
    Generate 2-3 additional closely related seed keywords that would help discover \
    more relevant long-tail keywords. Return only the new keywords as a \
    comma-separated list, nothing else.";
