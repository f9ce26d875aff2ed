//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - rounded table with a colored summary (default)
    #[default]
    Table,
    /// JSON format - structured for scripts and CI
    Json,
    /// Markdown format - for pull request comments and reports
    Markdown,
}

impl OutputFormat {
    /// Whether stdout is meant for machines, so stderr chatter stays quiet
    pub fn is_machine(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}
