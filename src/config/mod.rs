//! Configuration management for the zombie detector
//!
//! Settings come from an optional YAML file. CLI flags and environment
//! variables override them later in `CommandContext`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Packages with no push for longer than this are flagged (two years)
pub const DEFAULT_THRESHOLD_DAYS: i64 = 730;

/// Packages checked concurrently
pub const DEFAULT_JOBS: usize = 8;

/// Timeout applied to every outbound request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const PYPI_BASE_URL: &str = "https://pypi.org";
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Application configuration file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Days without a push before a package is flagged
    pub threshold_days: i64,

    /// Maximum packages checked at once
    pub jobs: usize,

    /// Override for the activity cache file location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_file: Option<PathBuf>,

    /// Rules for picking a repository link out of package metadata
    pub links: LinkRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold_days: DEFAULT_THRESHOLD_DAYS,
            jobs: DEFAULT_JOBS,
            cache_file: None,
            links: LinkRules::default(),
        }
    }
}

/// Label and host rules used when choosing among metadata links.
///
/// All matching is case-insensitive substring matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkRules {
    /// Hosts recognized as source hosting
    pub hosting_patterns: Vec<String>,

    /// Labels preferred over plain enumeration order
    pub priority_labels: Vec<String>,

    /// Labels never considered, even on a recognized host
    pub ignore_labels: Vec<String>,
}

impl Default for LinkRules {
    fn default() -> Self {
        Self {
            hosting_patterns: vec!["github.com".to_string()],
            priority_labels: ["source", "code", "repository", "repo"]
                .into_iter()
                .map(String::from)
                .collect(),
            ignore_labels: ["documentation", "docs", "tracker", "issues", "bug"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl LinkRules {
    pub fn is_hosted(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.hosting_patterns
            .iter()
            .any(|p| host.contains(&p.to_lowercase()))
    }

    pub fn is_ignored(&self, label: &str) -> bool {
        contains_any(label, &self.ignore_labels)
    }

    pub fn is_priority(&self, label: &str) -> bool {
        contains_any(label, &self.priority_labels)
    }
}

fn contains_any(label: &str, terms: &[String]) -> bool {
    let label = label.to_lowercase();
    terms.iter().any(|t| label.contains(&t.to_lowercase()))
}

impl Config {
    /// Get the default config file path (~/.config/zombie-detector/config.yaml on Linux)
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::Invalid(
            "Could not determine config directory".to_string(),
        ))?;

        Ok(base.join("zombie-detector").join("config.yaml"))
    }

    /// Load from an explicit path, or from the default location when `None`.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::load_from(Path::new(p))?,
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::load_from(&default)?
                } else {
                    log::debug!("No config file at {}, using defaults", default.display());
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        log::debug!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Reject values the scanner cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.threshold_days < 0 {
            return Err(
                ConfigError::Invalid("threshold_days must not be negative".to_string()).into(),
            );
        }
        if self.jobs == 0 {
            return Err(ConfigError::Invalid("jobs must be at least 1".to_string()).into());
        }
        Ok(())
    }
}
