//! Arguments for scanning a requirements file

use std::path::PathBuf;

use clap::Args;

/// Scan options, flattened into the top-level command
#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Requirements file to check
    #[arg(value_name = "REQUIREMENTS_FILE", default_value = "requirements.txt")]
    pub requirements: PathBuf,

    /// Days without a push before a package is flagged as a zombie
    #[arg(long, value_name = "DAYS", env = "ZOMBIE_THRESHOLD_DAYS", hide_env = true)]
    pub threshold: Option<i64>,

    /// Only check that each package exists on PyPI
    #[arg(long)]
    pub validate: bool,

    /// Number of packages checked concurrently
    #[arg(long, short = 'j', value_name = "N")]
    pub jobs: Option<usize>,

    /// GitHub token for the higher API rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,
}

impl ScanArgs {
    /// Token with blank values treated as absent
    pub fn token(&self) -> Option<&str> {
        self.github_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
