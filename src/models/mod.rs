//! Shared domain and display models

pub mod display;
pub mod repo_url;

pub use display::sorted_rows;
pub use repo_url::RepositoryUrl;
