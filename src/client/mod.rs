//! Remote API clients for the package index and the hosting provider

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::LookupError;
use crate::models::RepositoryUrl;

pub mod github;
#[cfg(test)]
pub mod mock;
pub mod parallel;
pub mod pypi;

pub use github::GitHubClient;
pub use parallel::run_bounded;
pub use pypi::PypiClient;

/// Package index lookups
#[async_trait]
pub trait PackageIndex: Send + Sync {
    /// Resolve a package name to its most authoritative repository URL
    async fn resolve(&self, name: &str) -> Result<RepositoryUrl, LookupError>;

    /// Check that the package exists, without inspecting its metadata
    async fn exists(&self, name: &str) -> Result<(), LookupError>;
}

/// Raw hosting-provider repository metadata
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// Last push time for `owner/repo`; `Ok(None)` when the field is absent
    async fn pushed_at(&self, owner: &str, repo: &str)
    -> Result<Option<DateTime<Utc>>, LookupError>;
}

/// Last-activity lookups keyed by repository URL
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn last_activity(&self, url: &RepositoryUrl) -> Result<DateTime<Utc>, LookupError>;
}

/// User-Agent sent to both services
pub(crate) fn user_agent() -> String {
    format!("zombie-detector/{}", env!("CARGO_PKG_VERSION"))
}
