//! Keyword pool — durable store of researched keywords per website.

pub mod handlers;
pub mod store;
