//! Per-root reconciliation walk
//!
//! Walks one labeled root directory recursively and brings the cache up
//! to date for every container file found: unchanged files reuse their
//! cached record with zero container I/O, new or modified files are fully
//! re-derived. A file that fails derivation is logged and skipped; it
//! never aborts the walk.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use pakette_formats::pkg::{PkgError, PkgFile, entry_id};
use pakette_formats::sfo::{self, SfoFields};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::cache::{CatalogCache, ScanDecision};
use crate::error::Result;
use crate::icon::IconExtractor;
use crate::record::{ContentKey, MetadataRecord, format_file_size};
use crate::stats::ScanStats;

/// Walk `root` and reconcile the cache for every container file under it
///
/// Returns the records for this root in enumeration order plus the set of
/// container paths observed on disk. The found set includes files whose
/// derivation failed; their presence on disk keeps any prior cache entry
/// alive (eviction is strictly path-based).
pub fn reconcile_root(
    cache: &mut CatalogCache,
    icons: &IconExtractor,
    stats: &mut ScanStats,
    category: &str,
    root: &Path,
) -> (Vec<MetadataRecord>, HashSet<PathBuf>) {
    info!("Scanning [{category}] {}", root.display());
    if !root.is_dir() {
        warn!(
            "Path for '{category}' is not a directory, skipping: {}",
            root.display()
        );
        return (Vec::new(), HashSet::new());
    }

    let mut records = Vec::new();
    let mut found = HashSet::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() || !has_pkg_extension(entry.path()) {
            continue;
        }
        let path = entry.path();
        stats.files_seen += 1;
        found.insert(path.to_path_buf());

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!("Failed to stat {}: {err}", path.display());
                stats.failed += 1;
                continue;
            }
        };
        let mtime_ns = mtime_nanos(&metadata);
        let file_size = metadata.len();

        match cache.decision(path, mtime_ns) {
            ScanDecision::Reuse => {
                // Common case: no container I/O. The category label may
                // have changed between runs, so it is always overwritten.
                if let Some(cached) = cache.get(path) {
                    let mut record = cached.clone();
                    record.category = category.to_string();
                    cache.insert(record.clone());
                    records.push(record);
                    stats.reused += 1;
                }
            }
            ScanDecision::Rederive => {
                debug!("Processing file: {}", path.display());
                match derive_record(path, category, mtime_ns, file_size, icons) {
                    Ok(record) => {
                        cache.insert(record.clone());
                        records.push(record);
                        stats.rederived += 1;
                        stats.containers_opened += 1;
                    }
                    Err(err) => {
                        warn!("Failed to process {}: {err}", path.display());
                        stats.failed += 1;
                    }
                }
            }
        }
    }

    (records, found)
}

/// Fully derive a fresh record from container contents
fn derive_record(
    path: &Path,
    category: &str,
    mtime_ns: u64,
    file_size: u64,
    icons: &IconExtractor,
) -> Result<MetadataRecord> {
    let pkg = PkgFile::open(path)?;

    let fields = match pkg.read_entry(entry_id::PARAM_SFO) {
        Ok(bytes) => sfo::parse(&bytes),
        Err(PkgError::EntryNotFound(_)) => SfoFields::default(),
        Err(err) => return Err(err.into()),
    };

    let key = ContentKey::derive(pkg.content_id(), path);
    let icon_path = icons.extract(&pkg, key.as_str());

    Ok(MetadataRecord {
        path: path.to_path_buf(),
        filename: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        category: category.to_string(),
        title: fields.title,
        package_class: fields.category,
        title_id: fields.title_id,
        key,
        icon_path,
        file_size,
        file_size_display: format_file_size(file_size),
        mtime_ns,
    })
}

fn has_pkg_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pkg"))
}

fn mtime_nanos(metadata: &std::fs::Metadata) -> u64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |d| d.as_nanos() as u64)
}
