//! Content-addressed retrieval index
//!
//! Maps retrieval keys (content identifier or path hash) to container
//! paths. Rebuilt in full from the cache after every scan and read-only
//! in between; never updated partially.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cache::CatalogCache;

/// Retrieval-key to file-path lookup table
#[derive(Debug, Default)]
pub struct ContentIndex {
    map: HashMap<String, PathBuf>,
}

impl ContentIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the full index from the cache, discarding prior contents
    pub fn rebuild(&mut self, cache: &CatalogCache) {
        self.map.clear();
        for record in cache.records() {
            self.map
                .insert(record.retrieval_key().to_string(), record.path.clone());
        }
        debug!("Built lookup index with {} entries", self.map.len());
    }

    /// Resolve a retrieval key to the container path it identifies
    pub fn resolve(&self, key: &str) -> Option<&Path> {
        self.map.get(key).map(PathBuf::as_path)
    }

    /// Number of indexed keys
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when no keys are indexed
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
