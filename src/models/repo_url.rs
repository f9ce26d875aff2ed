//! Normalized source repository URLs

use std::fmt;

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// A repository URL in canonical form, suitable as a cache key input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryUrl(String);

/// Strip trailing slashes and `.git` suffixes until nothing changes.
///
/// `https://github.com/a/b.git/` becomes `https://github.com/a/b`.
pub fn normalize(url: &str) -> String {
    let mut current = url.trim();
    loop {
        let stripped = current.trim_end_matches('/');
        let stripped = stripped.strip_suffix(".git").unwrap_or(stripped);
        if stripped.len() == current.len() {
            return current.to_string();
        }
        current = stripped;
    }
}

impl RepositoryUrl {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Owner and repository name from the first two path segments.
    ///
    /// Returns `None` for unparseable URLs or paths with fewer than two segments.
    pub fn owner_repo(&self) -> Option<(String, String)> {
        let url = Url::parse(&self.0).ok()?;
        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let repo = segments.next()?;
        Some((owner.to_string(), repo.to_string()))
    }
}

impl fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
