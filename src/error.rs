//! Error types for the zombie detector

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for run-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application.
///
/// Only these abort a run. Per-package failures are [`LookupError`] values
/// that end up as a verdict reason instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Requirements file not found: {}", .0.display())]
    RequirementsNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

/// Per-package lookup failures against the package index or the hosting provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    NotFound(String),

    #[error(
        "GitHub API rate limit exceeded (remaining: {})",
        .remaining.as_deref().unwrap_or("unknown")
    )]
    RateLimited { remaining: Option<String> },

    #[error("No GitHub repository found")]
    NoRepositoryLink,

    #[error("Could not parse GitHub URL: {0}")]
    UnparseableUrl(String),

    #[error("{0}")]
    Parse(String),
}

impl LookupError {
    /// Map a reqwest failure onto a transport diagnostic, naming the service.
    pub fn transport(service: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Transport(format!("{} API timeout", service))
        } else if err.is_connect() {
            LookupError::Transport(format!("{} API connection error", service))
        } else {
            LookupError::Transport(format!("{} API error: {}", service, err))
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Activity cache errors. Never fatal during a scan; surfaced by `cache` commands.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Could not determine cache directory")]
    NoHome,

    #[error("Cache I/O error: {0}")]
    Io(String),

    #[error("Cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_not_found_message() {
        let err = LookupError::NotFound("Package not found on PyPI".to_string());
        assert_eq!(err.to_string(), "Package not found on PyPI");
    }

    #[test]
    fn test_lookup_error_rate_limited_with_hint() {
        let err = LookupError::RateLimited {
            remaining: Some("0".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("rate limit"));
        assert!(msg.contains("remaining: 0"));
    }

    #[test]
    fn test_lookup_error_rate_limited_without_hint() {
        let err = LookupError::RateLimited { remaining: None };
        assert!(err.to_string().contains("unknown"));
    }

    #[test]
    fn test_lookup_error_no_repository_link() {
        assert_eq!(
            LookupError::NoRepositoryLink.to_string(),
            "No GitHub repository found"
        );
    }

    #[test]
    fn test_lookup_error_unparseable_url() {
        let err = LookupError::UnparseableUrl("https://github.com/only-owner".to_string());
        assert!(err.to_string().contains("only-owner"));
    }

    #[test]
    fn test_requirements_not_found_names_path() {
        let err = Error::RequirementsNotFound(PathBuf::from("missing/requirements.txt"));
        assert!(err.to_string().contains("missing/requirements.txt"));
    }

    #[test]
    fn test_error_from_config_error() {
        let cfg_err = ConfigError::Invalid("jobs must be positive".to_string());
        let err: Error = cfg_err.into();

        match err {
            Error::Config(ConfigError::Invalid(msg)) => assert!(msg.contains("jobs")),
            _ => panic!("Expected Error::Config(ConfigError::Invalid)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }

    #[test]
    fn test_cache_error_io_message() {
        let err = CacheError::Io("disk full".to_string());
        assert!(err.to_string().contains("disk full"));
    }
}
