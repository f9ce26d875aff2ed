//! Local cache for repository activity lookups
//!
//! Keeps hosting-provider responses in a single JSON file so repeated runs
//! stay well inside the anonymous API rate limit.

pub mod client;
pub mod key;
pub mod storage;

use std::time::Duration;

/// Cache TTL configuration per data type
pub struct CacheTtl;

impl CacheTtl {
    // Push timestamps move slowly relative to a two-year threshold
    pub const REPO_ACTIVITY: Duration = Duration::from_secs(24 * 60 * 60); // 24 hr
}

// Re-export main types
pub use client::CachedActivityClient;
pub use key::cache_key;
pub use storage::{ActivityCache, CacheEntry};
