//! Requirements scan command

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, ScanArgs};
use crate::error::{ConfigError, Result};
use crate::health::CheckMode;
use crate::output::{self, Report};
use crate::parser::parse_requirements;

/// Scan a requirements file and print the report.
///
/// Returns the process exit code: 1 when any package is a zombie or invalid.
pub async fn run(args: &ScanArgs, opts: &GlobalOptions) -> Result<i32> {
    let ctx = CommandContext::new(opts)?;
    let names = parse_requirements(&args.requirements)?;

    let mode = check_mode(args, &ctx)?;

    if names.is_empty() {
        eprintln!(
            "{} No packages found in {}",
            "⚠".yellow(),
            args.requirements.display()
        );
        if ctx.format.is_machine() {
            output::print(&Report::new(Vec::new(), threshold_of(mode)), ctx.format)?;
        }
        return Ok(0);
    }

    let token = args.token();
    if token.is_none() && !args.validate && !ctx.format.is_machine() {
        eprintln!(
            "{} GITHUB_TOKEN not set: using the anonymous GitHub rate limit (60 requests/hour instead of 5000)",
            "⚠".yellow()
        );
    }

    let jobs = args.jobs.unwrap_or(ctx.config.jobs).max(1);
    let checker = ctx.health_checker(token)?;
    log::debug!("Checking {} packages with {} jobs ({:?})", names.len(), jobs, mode);

    let progress = progress_bar(names.len() as u64, ctx.format);
    let tick = progress.clone();
    let verdicts = checker
        .check_all(names, mode, jobs, move |verdict| {
            tick.set_message(verdict.package.clone());
            tick.inc(1);
        })
        .await;
    progress.finish_and_clear();

    let report = Report::new(verdicts, threshold_of(mode));
    output::print(&report, ctx.format)?;

    Ok(report.summary.exit_code())
}

/// Resolve the check mode, with `--threshold` taking precedence over config
fn check_mode(args: &ScanArgs, ctx: &CommandContext) -> Result<CheckMode> {
    if args.validate {
        return Ok(CheckMode::Validate);
    }

    let threshold_days = args.threshold.unwrap_or(ctx.config.threshold_days);
    if threshold_days < 0 {
        return Err(ConfigError::Invalid("--threshold must not be negative".to_string()).into());
    }

    Ok(CheckMode::Health { threshold_days })
}

fn threshold_of(mode: CheckMode) -> Option<i64> {
    match mode {
        CheckMode::Health { threshold_days } => Some(threshold_days),
        CheckMode::Validate => None,
    }
}

/// Progress on stderr; hidden entirely for machine-readable output
fn progress_bar(total: u64, format: OutputFormat) -> ProgressBar {
    if format.is_machine() {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
