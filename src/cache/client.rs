//! Cached wrapper for the repository activity API
//!
//! Serves fresh cache entries without touching the network and records every
//! successful remote lookup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::cache::{ActivityCache, CacheEntry, cache_key};
use crate::client::{ActivitySource, RepositoryApi};
use crate::error::LookupError;
use crate::models::RepositoryUrl;

/// Cached wrapper for any RepositoryApi implementation.
///
/// Cache can be disabled by passing `None` (for `--no-cache`).
pub struct CachedActivityClient<C: RepositoryApi> {
    inner: Arc<C>,
    cache: Option<Arc<ActivityCache>>,
}

impl<C: RepositoryApi> CachedActivityClient<C> {
    /// Create a new cached client wrapper.
    ///
    /// # Arguments
    /// * `inner` - The underlying API client to wrap
    /// * `cache` - Shared cache handle, or `None` to always go to the network
    pub fn new(inner: C, cache: Option<Arc<ActivityCache>>) -> Self {
        Self {
            inner: Arc::new(inner),
            cache,
        }
    }

    fn get_cached(&self, key: &str) -> Option<CacheEntry> {
        self.cache.as_ref()?.get(key)
    }

    fn set_cached(&self, key: &str, url: &RepositoryUrl, pushed_at: Option<DateTime<Utc>>) {
        if let Some(ref cache) = self.cache {
            cache.put(key, CacheEntry::new(url.as_str(), pushed_at, Utc::now()));
        }
    }
}

fn missing_pushed_at(url: &RepositoryUrl) -> LookupError {
    LookupError::Parse(format!("No pushed_at timestamp for {}", url))
}

#[async_trait]
impl<C: RepositoryApi + 'static> ActivitySource for CachedActivityClient<C> {
    async fn last_activity(&self, url: &RepositoryUrl) -> Result<DateTime<Utc>, LookupError> {
        let key = cache_key(url);

        if let Some(cached) = self.get_cached(&key) {
            log::debug!("Cache hit: {}", url);
            return cached.pushed_at.ok_or_else(|| missing_pushed_at(url));
        }

        let (owner, repo) = url
            .owner_repo()
            .ok_or_else(|| LookupError::UnparseableUrl(url.to_string()))?;

        let pushed_at = self.inner.pushed_at(&owner, &repo).await?;
        self.set_cached(&key, url, pushed_at);

        pushed_at.ok_or_else(|| missing_pushed_at(url))
    }
}
