//! Health verdict display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{EMPTY, format_date, truncate_string};
use crate::health::HealthVerdict;

/// Longest reason shown in a table cell
const MAX_REASON_LEN: usize = 60;

/// Verdict display model for table/markdown output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct VerdictDisplay {
    #[tabled(rename = "PACKAGE")]
    pub package: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    /// Whole days since the last push
    #[tabled(rename = "DAYS")]
    pub days: String,

    #[tabled(rename = "LAST PUSH")]
    pub last_push: String,

    #[tabled(rename = "REPOSITORY")]
    pub repository: String,

    #[tabled(rename = "DETAILS")]
    pub details: String,
}

impl From<&HealthVerdict> for VerdictDisplay {
    fn from(verdict: &HealthVerdict) -> Self {
        Self {
            package: verdict.package.clone(),
            status: verdict.status.to_string(),
            days: verdict
                .days_since_activity
                .map(|d| d.to_string())
                .unwrap_or_else(|| EMPTY.to_string()),
            last_push: format_date(verdict.last_activity),
            repository: verdict
                .repository
                .as_ref()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            details: truncate_string(&verdict.reason, MAX_REASON_LEN),
        }
    }
}

/// Rows ordered for reading: problems first, then by package name
pub fn sorted_rows(verdicts: &[HealthVerdict]) -> Vec<VerdictDisplay> {
    let mut ordered: Vec<&HealthVerdict> = verdicts.iter().collect();
    ordered.sort_by(|a, b| {
        a.status
            .sort_rank()
            .cmp(&b.status.sort_rank())
            .then_with(|| a.package.cmp(&b.package))
    });
    ordered.into_iter().map(VerdictDisplay::from).collect()
}
