//! Global CLI options shared across all commands

use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// For most options, the precedence is: CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; config file defaults are resolved later in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (table, json, markdown)
    pub format: OutputFormat,

    /// Custom config file path
    pub config: Option<String>,

    /// Skip the activity cache entirely
    pub no_cache: bool,

    /// Custom cache file location
    pub cache_file: Option<PathBuf>,

    /// Package index base URL override
    pub pypi_url: Option<String>,

    /// GitHub API base URL override
    pub github_api_url: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            no_cache: cli.no_cache,
            cache_file: cli.cache_file.clone(),
            pypi_url: cli.pypi_url.clone(),
            github_api_url: cli.github_api_url.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }
}
