//! Content calendar — assigns pooled keywords to publish dates.

pub mod allocator;
pub mod change;
pub mod handlers;
