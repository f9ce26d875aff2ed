//! Display model implementations for table and markdown output
//!
//! Display models transform verdicts into CLI-friendly rows with
//! appropriate column names.

mod common;
mod verdict;

pub use verdict::sorted_rows;
