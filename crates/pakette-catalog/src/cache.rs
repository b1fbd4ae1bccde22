//! Persistent path-keyed metadata cache
//!
//! The cache maps absolute container paths to [`MetadataRecord`]s and has
//! an explicit load / mutate / persist cycle bounded to one scan: loaded
//! at scan start, updated per file, pruned of orphans once every root has
//! been walked, persisted at scan end. A load failure degrades to an
//! empty cache and a persist failure is logged; neither is fatal.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::record::MetadataRecord;

/// Per-file staleness decision, made once before any container I/O
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDecision {
    /// A record exists for the exact path with an equal modification
    /// time; reuse it without touching the container
    Reuse,
    /// New file or changed modification time; re-derive the record
    Rederive,
}

/// Mapping from absolute container path to cached metadata record
#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: HashMap<PathBuf, MetadataRecord>,
}

impl CatalogCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a persisted cache file
    ///
    /// A missing, unreadable, or corrupt file yields an empty cache with
    /// a warning; cache loss is never a fatal startup condition.
    pub fn load(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No cache file at {}, starting empty", path.display());
                return Self::new();
            }
            Err(err) => {
                warn!("Failed to read cache file {}: {err}", path.display());
                return Self::new();
            }
        };

        match serde_json::from_str::<HashMap<PathBuf, MetadataRecord>>(&data) {
            Ok(entries) => {
                debug!("Loaded {} cached records from {}", entries.len(), path.display());
                Self { entries }
            }
            Err(err) => {
                warn!(
                    "Cache file {} is corrupt ({err}), starting empty",
                    path.display()
                );
                Self::new()
            }
        }
    }

    /// Persist the cache to a file
    pub fn persist(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, data)?;
        debug!("Persisted {} records to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Decide whether the record for `path` can be reused for the current
    /// on-disk modification time
    pub fn decision(&self, path: &Path, mtime_ns: u64) -> ScanDecision {
        match self.entries.get(path) {
            Some(record) if record.mtime_ns == mtime_ns => ScanDecision::Reuse,
            _ => ScanDecision::Rederive,
        }
    }

    /// Look up a record by path
    pub fn get(&self, path: &Path) -> Option<&MetadataRecord> {
        self.entries.get(path)
    }

    /// Insert or replace the record for its path
    pub fn insert(&mut self, record: MetadataRecord) {
        self.entries.insert(record.path.clone(), record);
    }

    /// Remove every record whose path was not observed on disk during the
    /// current scan; returns the number of evicted records
    ///
    /// Must only be called after all configured roots have been walked;
    /// pruning mid-enumeration would delete entries for roots not yet
    /// scanned in the same pass.
    pub fn evict_orphans(&mut self, found: &HashSet<PathBuf>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|path, _| found.contains(path));
        let evicted = before - self.entries.len();
        if evicted > 0 {
            info!("Evicted {evicted} orphaned cache entries");
        }
        evicted
    }

    /// Iterate over all cached records
    pub fn records(&self) -> impl Iterator<Item = &MetadataRecord> {
        self.entries.values()
    }

    /// Number of cached records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds no records
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::record::{ContentKey, format_file_size};
    use pretty_assertions::assert_eq;

    fn record_at(path: &str, mtime_ns: u64) -> MetadataRecord {
        let path = PathBuf::from(path);
        MetadataRecord {
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            key: ContentKey::derive(None, &path),
            path,
            category: "games".into(),
            title: None,
            package_class: None,
            title_id: None,
            icon_path: None,
            file_size: 100,
            file_size_display: format_file_size(100),
            mtime_ns,
        }
    }

    #[test]
    fn test_decision_matrix() {
        let mut cache = CatalogCache::new();
        cache.insert(record_at("/pkgs/a.pkg", 1000));

        // Same path, same mtime: reuse
        assert_eq!(
            cache.decision(Path::new("/pkgs/a.pkg"), 1000),
            ScanDecision::Reuse
        );
        // Same path, different mtime: rederive
        assert_eq!(
            cache.decision(Path::new("/pkgs/a.pkg"), 2000),
            ScanDecision::Rederive
        );
        // Unknown path: rederive
        assert_eq!(
            cache.decision(Path::new("/pkgs/b.pkg"), 1000),
            ScanDecision::Rederive
        );
    }

    #[test]
    fn test_evict_orphans_keeps_found_paths() {
        let mut cache = CatalogCache::new();
        cache.insert(record_at("/pkgs/a.pkg", 1));
        cache.insert(record_at("/pkgs/b.pkg", 1));
        cache.insert(record_at("/pkgs/c.pkg", 1));

        let found: HashSet<PathBuf> =
            [PathBuf::from("/pkgs/a.pkg"), PathBuf::from("/pkgs/c.pkg")]
                .into_iter()
                .collect();

        let evicted = cache.evict_orphans(&found);
        assert_eq!(evicted, 1);
        assert_eq!(cache.len(), 2);
        assert!(cache.get(Path::new("/pkgs/a.pkg")).is_some());
        assert!(cache.get(Path::new("/pkgs/b.pkg")).is_none());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let cache = CatalogCache::load(&dir.path().join("absent.json"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{not json").expect("Should write file");

        let cache = CatalogCache::load(&path);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_persist_and_reload_round_trip() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("catalog.json");

        let mut cache = CatalogCache::new();
        cache.insert(record_at("/pkgs/a.pkg", 42));
        cache.insert(record_at("/pkgs/b.pkg", 43));
        cache.persist(&path).expect("Should persist");

        let reloaded = CatalogCache::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(
            reloaded.get(Path::new("/pkgs/a.pkg")).map(|r| r.mtime_ns),
            Some(42)
        );
    }

    #[test]
    fn test_insert_replaces_by_path() {
        let mut cache = CatalogCache::new();
        cache.insert(record_at("/pkgs/a.pkg", 1));
        cache.insert(record_at("/pkgs/a.pkg", 2));
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get(Path::new("/pkgs/a.pkg")).map(|r| r.mtime_ns),
            Some(2)
        );
    }
}
