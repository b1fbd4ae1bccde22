//! Top-level catalog facade
//!
//! Owns the cache, the retrieval index, and the per-category presentation
//! lists, and drives the full scan pipeline over a set of labeled roots.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::bundle::{self, CatalogEntry};
use crate::cache::CatalogCache;
use crate::config::{CatalogConfig, ScanRoot};
use crate::icon::IconExtractor;
use crate::index::ContentIndex;
use crate::scan::reconcile_root;
use crate::stats::ScanStats;

/// Incremental catalog over a set of labeled container roots
///
/// One handle owns one persisted cache file. `scan` takes `&mut self`, so
/// a handle can only run one scan at a time; the results of the latest
/// scan stay queryable until the next one replaces them.
#[derive(Debug)]
pub struct Catalog {
    config: CatalogConfig,
    cache: CatalogCache,
    index: ContentIndex,
    entries: HashMap<String, Vec<CatalogEntry>>,
    stats: ScanStats,
}

impl Catalog {
    /// Create a catalog over the given storage locations
    ///
    /// Nothing is read from disk until the first [`scan`](Self::scan).
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            cache: CatalogCache::new(),
            index: ContentIndex::new(),
            entries: HashMap::new(),
            stats: ScanStats::default(),
        }
    }

    /// Run a full scan over `roots` and return the per-category entries
    ///
    /// Loads the persisted cache, reconciles every root against it, prunes
    /// entries whose files are gone from disk, persists the cache, and
    /// rebuilds the retrieval index. Roots sharing a category label have
    /// their entries merged into one list. A persist failure is logged and
    /// does not fail the scan.
    pub fn scan(&mut self, roots: &[ScanRoot]) -> &HashMap<String, Vec<CatalogEntry>> {
        self.cache = CatalogCache::load(&self.config.cache_file);
        self.stats = ScanStats::default();
        let icons = IconExtractor::new(self.config.asset_dir.clone());

        let mut entries: HashMap<String, Vec<CatalogEntry>> = HashMap::new();
        let mut found_all: HashSet<PathBuf> = HashSet::new();

        for root in roots {
            let root_path = std::fs::canonicalize(&root.path).unwrap_or_else(|_| root.path.clone());
            let (records, found) = reconcile_root(
                &mut self.cache,
                &icons,
                &mut self.stats,
                &root.category,
                &root_path,
            );
            found_all.extend(found);
            let aggregated = bundle::aggregate(records, &root_path, &root.category);
            if !aggregated.is_empty() {
                entries
                    .entry(root.category.clone())
                    .or_default()
                    .extend(aggregated);
            }
        }

        // Eviction must wait until every root has been walked, otherwise
        // entries for the roots still pending would look orphaned.
        self.stats.evicted = self.cache.evict_orphans(&found_all) as u64;

        // Merging lists from same-label roots breaks the per-root sort
        for list in entries.values_mut() {
            list.sort_by(|a, b| a.sort_title().cmp(b.sort_title()));
        }

        if let Err(err) = self.cache.persist(&self.config.cache_file) {
            warn!(
                "Failed to persist cache to {}: {err}",
                self.config.cache_file.display()
            );
        }
        self.index.rebuild(&self.cache);
        self.entries = entries;

        info!(
            "Scan complete: {} files seen, {} reused, {} re-derived, {} failed, {} evicted",
            self.stats.files_seen,
            self.stats.reused,
            self.stats.rederived,
            self.stats.failed,
            self.stats.evicted
        );
        &self.entries
    }

    /// Resolve a retrieval key to the container path it identifies
    pub fn resolve(&self, key: &str) -> Option<&Path> {
        self.index.resolve(key)
    }

    /// Entries of one category from the latest scan
    pub fn entries(&self, category: &str) -> Option<&[CatalogEntry]> {
        self.entries.get(category).map(Vec::as_slice)
    }

    /// All per-category entries from the latest scan
    pub fn all_entries(&self) -> &HashMap<String, Vec<CatalogEntry>> {
        &self.entries
    }

    /// Number of resolvable retrieval keys
    ///
    /// Counts the index, not the cache: colliding retrieval keys collapse
    /// to one resolvable entry.
    pub fn record_count(&self) -> usize {
        self.index.len()
    }

    /// Counters from the latest scan
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// The catalog's storage configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}
