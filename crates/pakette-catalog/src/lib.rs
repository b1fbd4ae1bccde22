//! Incremental persistent catalog for console package containers.
//!
//! This crate walks configured root directories of PKG container files,
//! extracts embedded metadata (title, package class, content identifier,
//! icon) through `pakette-formats`, and maintains a persistent cache so
//! repeated scans avoid re-parsing unchanged files. On top of the cache it
//! builds a content-addressed index for retrieval by key and aggregates
//! sibling files in subdirectories into bundle entries for presentation.
//!
//! # Example
//!
//! ```rust,no_run
//! use pakette_catalog::{Catalog, CatalogConfig, ScanRoot};
//! use std::path::PathBuf;
//!
//! let config = CatalogConfig::new(
//!     PathBuf::from("catalog.json"),
//!     PathBuf::from("cached"),
//! );
//! let mut catalog = Catalog::new(config);
//!
//! let roots = vec![ScanRoot::new("games", "/srv/pkgs/games")];
//! let entries = catalog.scan(&roots);
//! for (category, list) in entries {
//!     println!("{category}: {} entries", list.len());
//! }
//! println!("{} records total", catalog.record_count());
//! ```
//!
//! # Concurrency
//!
//! A scan is single-threaded, synchronous, and blocking. `scan` takes
//! `&mut self`, so the type system enforces one scan at a time per
//! catalog handle; callers sharing one persisted cache file across
//! processes must serialize scan triggers themselves. The cache is
//! persisted only at the end of a successful scan.

#![warn(missing_docs)]

// Persisted metadata records and retrieval keys
pub mod record;

// Persistent path-keyed cache with staleness decisions
pub mod cache;

// Per-root reconciliation walk
pub mod scan;

// Icon extraction into the cache-asset directory
pub mod icon;

// Content-addressed retrieval index
pub mod index;

// Hierarchical bundle aggregation
pub mod bundle;

// Scan configuration
pub mod config;

// Scan counters
pub mod stats;

// Top-level catalog facade
mod catalog;

// Error types
pub mod error;

pub use bundle::{BundleEntry, BundleMember, CatalogEntry, PackageEntry};
pub use cache::{CatalogCache, ScanDecision};
pub use catalog::Catalog;
pub use config::{CatalogConfig, ScanRoot};
pub use error::{CatalogError, Result};
pub use icon::IconExtractor;
pub use index::ContentIndex;
pub use record::{ContentKey, MetadataRecord, PackageClass};
pub use stats::ScanStats;
