//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod cache;
pub mod completions;
pub mod context;
pub mod scan;

pub use args::{GlobalOptions, OutputFormat, ScanArgs};
pub use context::CommandContext;

/// Zombie Detector - find unmaintained packages in your Python dependencies
#[derive(Parser, Debug)]
#[command(name = "zombie-detector")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to execute (scans when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub scan: ScanArgs,

    /// Output format (table, json, markdown)
    #[arg(
        long,
        global = true,
        env = "ZOMBIE_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "ZOMBIE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ZOMBIE_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass the activity cache
    #[arg(long, global = true, env = "ZOMBIE_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Override activity cache file location
    #[arg(long, global = true, env = "ZOMBIE_CACHE_FILE", hide = true)]
    pub cache_file: Option<PathBuf>,

    /// Custom PyPI base URL for testing
    #[arg(long, global = true, env = "ZOMBIE_PYPI_URL", hide = true)]
    pub pypi_url: Option<String>,

    /// Custom GitHub API base URL for testing
    #[arg(long, global = true, env = "ZOMBIE_GITHUB_API_URL", hide = true)]
    pub github_api_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the repository activity cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   zombie-detector completions bash > /etc/bash_completion.d/zombie-detector
  zsh:    zombie-detector completions zsh > \"${fpath[1]}/_zombie-detector\"
  fish:   zombie-detector completions fish > ~/.config/fish/completions/zombie-detector.fish")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Clear all cached data
    Clear,
    /// Print cache file path
    Path,
}
