//! Keyword research pipeline: seed expansion, suggestion retrieval,
//! difficulty enrichment, scoring, and filtering.

pub mod client;
pub mod engine;
pub mod expander;
pub mod mock;
pub mod prompts;
