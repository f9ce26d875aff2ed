//! Output formatting for CLI results

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::health::{HealthVerdict, Summary};
use crate::models::sorted_rows;

pub mod formatters;
pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;
}

/// Format and print data to stdout
pub fn print<T: Formattable>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    println!("{}", output);
    Ok(())
}

/// Results of one run, ready to render.
///
/// `verdicts` stay in input order; table and markdown output re-sort them.
#[derive(Debug, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub results: Vec<HealthVerdict>,
    #[serde(skip)]
    pub threshold_days: Option<i64>,
}

impl Report {
    /// Build a report; `threshold_days` is `None` in validation mode
    pub fn new(results: Vec<HealthVerdict>, threshold_days: Option<i64>) -> Self {
        Self {
            summary: Summary::from_verdicts(&results),
            results,
            threshold_days,
        }
    }
}

impl Formattable for Report {
    fn format(&self, format: OutputFormat) -> Result<String> {
        let output = match format {
            OutputFormat::Json => json::format_json(self)?,
            OutputFormat::Table => format!(
                "{}\n\n{}",
                table::format_table(&sorted_rows(&self.results)),
                formatters::format_summary(&self.summary, self.threshold_days)
            ),
            OutputFormat::Markdown => format!(
                "# Dependency Health Report\n\n{}\n\n{}",
                table::format_markdown(&sorted_rows(&self.results)),
                formatters::format_summary_markdown(&self.summary, self.threshold_days)
            ),
        };
        Ok(output)
    }
}
