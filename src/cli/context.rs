//! Command execution context
//!
//! Resolves configuration layers and wires the clients, cache and health
//! checker that commands need.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::{ActivityCache, CachedActivityClient};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{GitHubClient, PypiClient};
use crate::config::Config;
use crate::error::Result;
use crate::health::HealthChecker;

/// Context for command execution containing config and runtime options.
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// Output format preference
    pub format: OutputFormat,
    opts: GlobalOptions,
}

impl CommandContext {
    /// Load configuration and capture the global options.
    ///
    /// # Errors
    /// Returns error if an explicit config file is missing or any config file is invalid.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;

        Ok(Self {
            config,
            format: opts.format,
            opts: opts.clone(),
        })
    }

    /// Cache file location: flag/env, then config file, then platform default
    pub fn cache_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.opts.cache_file {
            return Ok(path.clone());
        }
        if let Some(path) = &self.config.cache_file {
            return Ok(path.clone());
        }
        Ok(ActivityCache::default_path()?)
    }

    /// Open the activity cache, ignoring `--no-cache`
    pub fn open_cache(&self) -> Result<ActivityCache> {
        Ok(ActivityCache::open_at(&self.cache_path()?))
    }

    /// Cache used for lookups, or `None` when caching is disabled
    fn lookup_cache(&self) -> Result<Option<Arc<ActivityCache>>> {
        if self.opts.no_cache {
            log::debug!("Activity cache disabled");
            return Ok(None);
        }
        Ok(Some(Arc::new(self.open_cache()?)))
    }

    /// Build the health checker over PyPI and cached GitHub lookups.
    pub fn health_checker(&self, github_token: Option<&str>) -> Result<Arc<HealthChecker>> {
        let rules = self.config.links.clone();
        let index = match self.opts.pypi_url.as_deref() {
            Some(url) => PypiClient::with_base_url(url, rules)?,
            None => PypiClient::new(rules)?,
        };
        let github = match self.opts.github_api_url.as_deref() {
            Some(url) => GitHubClient::with_base_url(url, github_token)?,
            None => GitHubClient::new(github_token)?,
        };
        let activity = CachedActivityClient::new(github, self.lookup_cache()?);

        Ok(Arc::new(HealthChecker::new(Arc::new(index), Arc::new(activity))))
    }
}
