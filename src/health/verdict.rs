//! Health verdicts and run summaries

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::RepositoryUrl;

/// Package health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Safe,
    Warning,
    Unknown,
    Skipped,
    Invalid,
}

impl HealthStatus {
    /// Report ordering: problems first
    pub fn sort_rank(&self) -> u8 {
        match self {
            HealthStatus::Warning => 0,
            HealthStatus::Invalid => 1,
            HealthStatus::Safe => 2,
            HealthStatus::Skipped => 3,
            HealthStatus::Unknown => 4,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthStatus::Safe => "SAFE",
            HealthStatus::Warning => "WARNING",
            HealthStatus::Unknown => "UNKNOWN",
            HealthStatus::Skipped => "SKIPPED",
            HealthStatus::Invalid => "INVALID",
        };
        f.write_str(label)
    }
}

/// Health assessment for one package
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthVerdict {
    pub package: String,
    pub status: HealthStatus,
    pub reason: String,
    pub repository: Option<RepositoryUrl>,
    pub last_activity: Option<DateTime<Utc>>,
    pub days_since_activity: Option<i64>,
}

impl HealthVerdict {
    fn bare(package: &str, status: HealthStatus, reason: impl Into<String>) -> Self {
        Self {
            package: package.to_string(),
            status,
            reason: reason.into(),
            repository: None,
            last_activity: None,
            days_since_activity: None,
        }
    }

    pub fn unknown(
        package: &str,
        reason: impl Into<String>,
        repository: Option<RepositoryUrl>,
    ) -> Self {
        Self {
            repository,
            ..Self::bare(package, HealthStatus::Unknown, reason)
        }
    }

    pub fn skipped(package: &str, reason: impl Into<String>) -> Self {
        Self::bare(package, HealthStatus::Skipped, reason)
    }

    pub fn invalid(package: &str, reason: impl Into<String>) -> Self {
        Self::bare(package, HealthStatus::Invalid, reason)
    }

    /// A Safe or Warning verdict with full activity details
    pub fn assessed(
        package: &str,
        status: HealthStatus,
        reason: String,
        repository: RepositoryUrl,
        last_activity: DateTime<Utc>,
        days: i64,
    ) -> Self {
        Self {
            package: package.to_string(),
            status,
            reason,
            repository: Some(repository),
            last_activity: Some(last_activity),
            days_since_activity: Some(days),
        }
    }
}

/// Count of verdicts per status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub safe: usize,
    pub warning: usize,
    pub unknown: usize,
    pub skipped: usize,
    pub invalid: usize,
}

impl Summary {
    pub fn from_verdicts(verdicts: &[HealthVerdict]) -> Self {
        let mut summary = Self::default();
        for verdict in verdicts {
            summary.total += 1;
            match verdict.status {
                HealthStatus::Safe => summary.safe += 1,
                HealthStatus::Warning => summary.warning += 1,
                HealthStatus::Unknown => summary.unknown += 1,
                HealthStatus::Skipped => summary.skipped += 1,
                HealthStatus::Invalid => summary.invalid += 1,
            }
        }
        summary
    }

    /// 1 when any package is a zombie or invalid, else 0
    pub fn exit_code(&self) -> i32 {
        if self.warning > 0 || self.invalid > 0 {
            1
        } else {
            0
        }
    }
}
