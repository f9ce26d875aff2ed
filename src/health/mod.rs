//! Package health classification
//!
//! Drives index resolution and activity lookup for each package and turns
//! the outcome into a [`HealthVerdict`]. Every package is independent: a
//! failure ends that package's check and nothing else.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::client::{ActivitySource, PackageIndex, run_bounded};

pub mod verdict;

pub use verdict::{HealthStatus, HealthVerdict, Summary};

const ACTIVITY_UNAVAILABLE: &str = "Could not fetch repository data (404/Limit)";
const VALIDATION_OK: &str = "Package exists on PyPI (validation mode)";

/// What to do with each package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// Full resolution and activity assessment
    Health { threshold_days: i64 },
    /// Index existence only; never touches the hosting provider
    Validate,
}

/// Checks package health against a package index and an activity source
pub struct HealthChecker {
    index: Arc<dyn PackageIndex>,
    activity: Arc<dyn ActivitySource>,
}

impl HealthChecker {
    pub fn new(index: Arc<dyn PackageIndex>, activity: Arc<dyn ActivitySource>) -> Self {
        Self { index, activity }
    }

    pub async fn check(&self, name: &str, mode: CheckMode) -> HealthVerdict {
        match mode {
            CheckMode::Health { threshold_days } => self.classify(name, threshold_days).await,
            CheckMode::Validate => self.validate(name).await,
        }
    }

    /// Resolve, fetch activity, and compare against the threshold
    pub async fn classify(&self, name: &str, threshold_days: i64) -> HealthVerdict {
        self.classify_at(name, threshold_days, Utc::now()).await
    }

    async fn classify_at(
        &self,
        name: &str,
        threshold_days: i64,
        now: DateTime<Utc>,
    ) -> HealthVerdict {
        let url = match self.index.resolve(name).await {
            Ok(url) => url,
            Err(err) => {
                log::warn!("{}: resolution failed: {}", name, err);
                return HealthVerdict::unknown(name, err.to_string(), None);
            }
        };

        let last_activity = match self.activity.last_activity(&url).await {
            Ok(ts) => ts,
            Err(err) => {
                log::warn!("{}: {}", name, err);
                return HealthVerdict::unknown(name, ACTIVITY_UNAVAILABLE, Some(url));
            }
        };

        let (status, days, reason) = assess(last_activity, now, threshold_days);
        log::debug!("{}: {} ({} days)", name, status, days);

        HealthVerdict::assessed(name, status, reason, url, last_activity, days)
    }

    /// Check only that the package exists in the index
    pub async fn validate(&self, name: &str) -> HealthVerdict {
        match self.index.exists(name).await {
            Ok(()) => HealthVerdict::skipped(name, VALIDATION_OK),
            Err(err) => HealthVerdict::invalid(name, err.to_string()),
        }
    }

    /// Check every package with at most `jobs` in flight, in input order.
    ///
    /// `on_complete` runs once per package as its verdict is ready.
    pub async fn check_all<F>(
        self: &Arc<Self>,
        names: Vec<String>,
        mode: CheckMode,
        jobs: usize,
        on_complete: F,
    ) -> Vec<HealthVerdict>
    where
        F: Fn(&HealthVerdict) + Send + Sync + 'static,
    {
        let on_complete = Arc::new(on_complete);
        run_bounded(
            names,
            |name| {
                let checker = Arc::clone(self);
                let on_complete = Arc::clone(&on_complete);
                async move {
                    let verdict = checker.check(&name, mode).await;
                    on_complete(&verdict);
                    verdict
                }
            },
            jobs,
        )
        .await
    }
}

/// Classify a last-activity timestamp against the threshold.
///
/// Days are whole days, floored; a timestamp in the future counts as 0.
pub fn assess(
    last_activity: DateTime<Utc>,
    now: DateTime<Utc>,
    threshold_days: i64,
) -> (HealthStatus, i64, String) {
    let days = now.signed_duration_since(last_activity).num_days().max(0);

    if days > threshold_days {
        (
            HealthStatus::Warning,
            days,
            format!("No activity for {} days (threshold: {})", days, threshold_days),
        )
    } else {
        (
            HealthStatus::Safe,
            days,
            format!("Active: last commit {} days ago", days),
        )
    }
}
