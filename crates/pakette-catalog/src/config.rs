//! Scan configuration
//!
//! The catalog only consumes opaque storage locations from its caller: a
//! path for the persisted cache file, a directory for extracted icon
//! assets, and the list of labeled root directories to scan. Settings
//! persistence itself lives outside this crate.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage locations for one catalog instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path of the persisted cache file
    pub cache_file: PathBuf,
    /// Directory extracted icons are written to
    pub asset_dir: PathBuf,
}

impl CatalogConfig {
    /// Create a configuration from the two storage locations
    pub fn new(cache_file: impl Into<PathBuf>, asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_file: cache_file.into(),
            asset_dir: asset_dir.into(),
        }
    }
}

/// One labeled root directory to scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRoot {
    /// Category label records found under this root are tagged with
    pub category: String,
    /// Root directory to walk recursively
    pub path: PathBuf,
}

impl ScanRoot {
    /// Create a labeled scan root
    pub fn new(category: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            category: category.into(),
            path: path.into(),
        }
    }
}
