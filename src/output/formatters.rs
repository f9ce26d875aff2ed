//! Run summary rendering for table and markdown output

use colored::Colorize;

use crate::health::Summary;

/// Label for the zombie count, naming the threshold when there is one
fn zombie_label(threshold_days: Option<i64>) -> String {
    match threshold_days {
        Some(days) => format!("Zombies (>{} days)", days),
        None => "Zombies".to_string(),
    }
}

/// Colored multi-line summary for terminal output.
///
/// # Example output
/// ```text
/// Summary: 4 packages checked
///   ✓ Safe: 2
///   ⚠ Zombies (>730 days): 1
///   ✗ Invalid: 0
///   ? Unknown: 1
///   - Skipped: 0
/// ```
pub fn format_summary(summary: &Summary, threshold_days: Option<i64>) -> String {
    let lines = [
        format!("Summary: {} packages checked", summary.total).bold().to_string(),
        format!("  ✓ Safe: {}", summary.safe).green().to_string(),
        format!("  ⚠ {}: {}", zombie_label(threshold_days), summary.warning)
            .yellow()
            .to_string(),
        format!("  ✗ Invalid: {}", summary.invalid).red().to_string(),
        format!("  ? Unknown: {}", summary.unknown),
        format!("  - Skipped: {}", summary.skipped).dimmed().to_string(),
    ];
    lines.join("\n")
}

/// Markdown summary section
pub fn format_summary_markdown(summary: &Summary, threshold_days: Option<i64>) -> String {
    format!(
        "## Summary\n\n\
         - **Total:** {}\n\
         - **Safe:** {}\n\
         - **{}:** {}\n\
         - **Invalid:** {}\n\
         - **Unknown:** {}\n\
         - **Skipped:** {}",
        summary.total,
        summary.safe,
        zombie_label(threshold_days),
        summary.warning,
        summary.invalid,
        summary.unknown,
        summary.skipped,
    )
}
