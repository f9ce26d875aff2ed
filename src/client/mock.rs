//! Mock clients for testing
//!
//! Configure responses via builder methods, then count calls in assertions.
//! Unconfigured lookups answer with a not-found error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ActivitySource, PackageIndex, RepositoryApi};
use crate::error::LookupError;
use crate::models::RepositoryUrl;

/// Mock package index.
///
/// # Example
/// ```ignore
/// let index = MockPackageIndex::new()
///     .with_repo("requests", "https://github.com/psf/requests");
/// ```
#[derive(Default)]
pub struct MockPackageIndex {
    packages: HashMap<String, Result<RepositoryUrl, LookupError>>,
    resolve_calls: AtomicUsize,
    exists_calls: AtomicUsize,
}

impl MockPackageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(mut self, name: &str, url: &str) -> Self {
        self.packages
            .insert(name.to_string(), Ok(RepositoryUrl::new(url)));
        self
    }

    pub fn with_error(mut self, name: &str, err: LookupError) -> Self {
        self.packages.insert(name.to_string(), Err(err));
        self
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, name: &str) -> Result<RepositoryUrl, LookupError> {
        self.packages.get(name).cloned().unwrap_or_else(|| {
            Err(LookupError::NotFound("Package not found on PyPI".to_string()))
        })
    }
}

#[async_trait]
impl PackageIndex for MockPackageIndex {
    async fn resolve(&self, name: &str) -> Result<RepositoryUrl, LookupError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup(name)
    }

    async fn exists(&self, name: &str) -> Result<(), LookupError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        match self.lookup(name) {
            // A package without a usable link still exists on the index
            Ok(_) | Err(LookupError::NoRepositoryLink) | Err(LookupError::Parse(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }
}

/// Mock hosting-provider API keyed by `owner/repo`
#[derive(Default)]
pub struct MockRepositoryApi {
    repos: HashMap<String, Result<Option<DateTime<Utc>>, LookupError>>,
    calls: AtomicUsize,
}

impl MockRepositoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(mut self, owner: &str, repo: &str, pushed_at: Option<DateTime<Utc>>) -> Self {
        self.repos.insert(format!("{owner}/{repo}"), Ok(pushed_at));
        self
    }

    pub fn with_error(mut self, owner: &str, repo: &str, err: LookupError) -> Self {
        self.repos.insert(format!("{owner}/{repo}"), Err(err));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepositoryApi for MockRepositoryApi {
    async fn pushed_at(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<DateTime<Utc>>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = format!("{owner}/{repo}");
        self.repos
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(LookupError::NotFound(format!("Repository not found: {key}"))))
    }
}

/// Mock activity source keyed by normalized repository URL
#[derive(Default)]
pub struct MockActivitySource {
    activity: HashMap<String, Result<DateTime<Utc>, LookupError>>,
    calls: AtomicUsize,
}

impl MockActivitySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_activity(mut self, url: &str, pushed_at: DateTime<Utc>) -> Self {
        self.activity
            .insert(RepositoryUrl::new(url).to_string(), Ok(pushed_at));
        self
    }

    pub fn with_error(mut self, url: &str, err: LookupError) -> Self {
        self.activity
            .insert(RepositoryUrl::new(url).to_string(), Err(err));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActivitySource for MockActivitySource {
    async fn last_activity(&self, url: &RepositoryUrl) -> Result<DateTime<Utc>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.activity.get(url.as_str()).cloned().unwrap_or_else(|| {
            Err(LookupError::NotFound(format!("Repository not found: {url}")))
        })
    }
}
