//! requirements.txt parsing
//!
//! Produces the ordered, de-duplicated list of package names to check.

use std::path::Path;
use std::str::FromStr;

use indexmap::IndexSet;
use pep508_rs::{Requirement, VerbatimUrl};

use crate::error::{Error, Result};

/// Read a requirements file and return its package names.
///
/// A missing file is fatal. Unparseable lines are skipped with a warning.
pub fn parse_requirements(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::RequirementsNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    Ok(parse_requirements_str(&contents))
}

/// Extract package names from requirements text, first occurrence wins.
pub fn parse_requirements_str(contents: &str) -> Vec<String> {
    let mut names = IndexSet::new();

    for (index, raw) in contents.lines().enumerate() {
        let line = strip_comment(raw);
        if line.is_empty() || is_skipped(line) {
            continue;
        }

        match Requirement::<VerbatimUrl>::from_str(line) {
            Ok(req) => {
                names.insert(req.name.to_string());
            }
            Err(e) => {
                log::warn!(
                    "Skipping invalid requirement on line {}: {} ({})",
                    index + 1,
                    line,
                    e
                );
            }
        }
    }

    names.into_iter().collect()
}

fn strip_comment(line: &str) -> &str {
    line.split('#').next().unwrap_or("").trim()
}

/// pip options, editable installs and bare URLs name no index package
fn is_skipped(line: &str) -> bool {
    line.starts_with('-') || line.starts_with("http://") || line.starts_with("https://")
}
