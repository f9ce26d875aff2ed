//! Cache key generation using SHA-256 hashes

use sha2::{Digest, Sha256};

use crate::models::RepositoryUrl;

/// Generate a deterministic cache key from a normalized repository URL.
///
/// Equivalent URLs normalize to the same string, so they share a key.
pub fn cache_key(url: &RepositoryUrl) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_str().as_bytes());

    // Return hex-encoded hash
    format!("{:x}", hasher.finalize())
}
