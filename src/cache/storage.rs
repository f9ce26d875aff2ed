//! JSON-file-backed activity cache
//!
//! The whole file is loaded into memory on open and rewritten in full after
//! every `put`. Unreadable files degrade to an empty cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};

use crate::cache::CacheTtl;
use crate::error::CacheError;

type Result<T> = std::result::Result<T, CacheError>;

const CACHE_FILE_NAME: &str = "github_cache.json";

/// One cached repository activity lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Last push time reported by the hosting provider, if any
    pub pushed_at: Option<DateTime<Utc>>,

    /// When the lookup was stored
    pub cached_at: DateTime<Utc>,

    /// Original repository URL, kept for inspection
    pub url: String,
}

impl CacheEntry {
    pub fn new(url: &str, pushed_at: Option<DateTime<Utc>>, cached_at: DateTime<Utc>) -> Self {
        Self {
            pushed_at,
            cached_at,
            url: url.to_string(),
        }
    }

    /// Whether the entry may still be served at `now`.
    ///
    /// Entries stamped in the future are stale.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.cached_at).num_seconds();
        (0..CacheTtl::REPO_ACTIVITY.as_secs() as i64).contains(&age)
    }
}

/// Activity cache shared by every lookup in a run.
///
/// Readers only take the map lock, so they never wait on a file write.
/// `flush` serializes writers so the file always reflects the latest put.
pub struct ActivityCache {
    entries: RwLock<BTreeMap<String, CacheEntry>>,
    path: Option<PathBuf>,
    flush: Mutex<()>,
}

impl ActivityCache {
    /// Get the cache directory path (~/.cache/zombie-detector on Linux)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("zombie-detector"))
    }

    /// Default cache file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::cache_dir()?.join(CACHE_FILE_NAME))
    }

    /// Open the cache backed by a specific file.
    ///
    /// Missing files start empty. Corrupt or unreadable files start empty with a warning.
    pub fn open_at(path: &Path) -> Self {
        let entries = match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Could not load cache {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("Could not load cache {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        log::debug!("Loaded {} cache entries from {}", entries.len(), path.display());

        Self {
            entries: RwLock::new(entries),
            path: Some(path.to_path_buf()),
            flush: Mutex::new(()),
        }
    }

    /// Cache with no backing file
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            path: None,
            flush: Mutex::new(()),
        }
    }

    /// Get a fresh entry; stale or absent keys miss
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.get_at(key, Utc::now())
    }

    /// Get an entry that is fresh at `now`
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<CacheEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|entry| entry.is_fresh_at(now))
            .cloned()
    }

    /// Store an entry (last write wins) and rewrite the backing file.
    ///
    /// A failed write is logged; the in-memory entry stays.
    pub fn put(&self, key: &str, entry: CacheEntry) {
        let _flush = self.flush.lock().unwrap_or_else(PoisonError::into_inner);

        let snapshot = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            entries.insert(key.to_string(), entry);
            self.path.as_ref().map(|_| entries.clone())
        };

        if let (Some(path), Some(snapshot)) = (self.path.as_deref(), snapshot)
            && let Err(e) = write_file(path, &snapshot)
        {
            log::warn!("Could not save cache {}: {}", path.display(), e);
        }
    }

    /// Remove every entry and the backing file
    pub fn clear(&self) -> Result<ClearStats> {
        let _flush = self.flush.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let removed = entries.len();
        entries.clear();

        if let Some(path) = self.path.as_deref()
            && path.exists()
        {
            std::fs::remove_file(path)
                .map_err(|e| CacheError::Io(format!("Failed to remove cache file: {}", e)))?;
        }

        Ok(ClearStats {
            entries_removed: removed,
        })
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.stats_at(Utc::now())
    }

    fn stats_at(&self, now: DateTime<Utc>) -> CacheStats {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let fresh: Vec<&CacheEntry> = entries.values().filter(|e| e.is_fresh_at(now)).collect();
        let size_bytes = self
            .path
            .as_deref()
            .and_then(|p| std::fs::metadata(p).ok())
            .map(|m| m.len() as usize)
            .unwrap_or(0);

        CacheStats {
            total_entries: entries.len(),
            valid_entries: fresh.len(),
            expired_entries: entries.len() - fresh.len(),
            size_bytes,
            oldest_entry: fresh.iter().map(|e| e.cached_at).min(),
            newest_entry: fresh.iter().map(|e| e.cached_at).max(),
        }
    }
}

/// Write the full document to a temp file, then move it into place
fn write_file(path: &Path, entries: &BTreeMap<String, CacheEntry>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;
    }

    let json = serde_json::to_vec_pretty(entries)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)
        .map_err(|e| CacheError::Io(format!("Failed to write cache: {}", e)))?;
    std::fs::rename(&tmp, path)
        .map_err(|e| CacheError::Io(format!("Failed to replace cache: {}", e)))?;

    Ok(())
}

/// Statistics about cache clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub size_bytes: usize,
    pub oldest_entry: Option<DateTime<Utc>>,
    pub newest_entry: Option<DateTime<Utc>>,
}
