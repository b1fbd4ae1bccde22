//! Hierarchical bundle aggregation
//!
//! Turns the flat list of records scanned for one category into the
//! presentation list: files directly under the root become individual
//! entries, files sharing a subdirectory fold into one bundle, and
//! recognized add-on subdirectories (`DLC` / `DLCS`, case-insensitive)
//! merge into the bundle of their parent directory. The marker set is a
//! closed policy, deliberately not extensible.
//!
//! Bundles are synthetic: built fresh on every scan, never persisted.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::{MetadataRecord, PackageClass, format_file_size};

/// Subdirectory names whose contents merge into the parent's bundle
const ADDON_DIR_MARKERS: &[&str] = &["DLC", "DLCS"];

/// A loose container file directly under a category root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    /// Human-readable title, when the parameter block carried one
    pub title: Option<String>,
    /// Container file name
    pub filename: String,
    /// Category label the file was found under
    pub category: String,
    /// Raw SFO class code
    pub package_class: Option<String>,
    /// Content-addressed lookup key
    pub retrieval_key: String,
    /// Icon file name relative to the asset directory
    pub icon_path: Option<String>,
    /// File size in bytes
    pub file_size: u64,
    /// Human-readable file size
    pub file_size_display: String,
}

impl PackageEntry {
    fn from_record(record: MetadataRecord) -> Self {
        Self {
            retrieval_key: record.retrieval_key().to_string(),
            title: record.title,
            filename: record.filename,
            category: record.category,
            package_class: record.package_class,
            icon_path: record.icon_path,
            file_size: record.file_size,
            file_size_display: record.file_size_display,
        }
    }
}

/// Summary of one container inside a bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleMember {
    /// Human-readable title
    pub title: Option<String>,
    /// Raw SFO class code
    pub package_class: Option<String>,
    /// Content-addressed lookup key
    pub retrieval_key: String,
}

impl BundleMember {
    fn from_record(record: &MetadataRecord) -> Self {
        Self {
            title: record.title.clone(),
            package_class: record.package_class.clone(),
            retrieval_key: record.retrieval_key().to_string(),
        }
    }
}

/// Aggregate entry for all container files found in one subdirectory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntry {
    /// Subdirectory name
    pub title: String,
    /// Category label
    pub category: String,
    /// Representative icon: first base-class member with an icon in rank
    /// order, else the first member's icon
    pub icon_path: Option<String>,
    /// Sum of member file sizes in bytes
    pub total_size: u64,
    /// Human-readable total size
    pub total_size_display: String,
    /// Member summaries in rank order
    pub members: Vec<BundleMember>,
}

/// One entry of a category's presentation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogEntry {
    /// A loose container file directly under the root
    Package(PackageEntry),
    /// A subdirectory folded into one aggregate
    Bundle(BundleEntry),
}

impl CatalogEntry {
    /// Title used for the final presentation sort
    pub fn sort_title(&self) -> &str {
        match self {
            Self::Package(p) => p.title.as_deref().unwrap_or(""),
            Self::Bundle(b) => &b.title,
        }
    }
}

/// Aggregate one category's records into its presentation list
///
/// `root` is the configured root directory the records were scanned
/// under. The output is sorted by title, case-sensitive ascending.
pub fn aggregate(records: Vec<MetadataRecord>, root: &Path, category: &str) -> Vec<CatalogEntry> {
    // Group by parent directory, preserving first-seen order so ties in
    // later sorts keep enumeration order.
    let mut order: Vec<PathBuf> = Vec::new();
    let mut groups: HashMap<PathBuf, Vec<MetadataRecord>> = HashMap::new();
    for record in records {
        let dir = record
            .path
            .parent()
            .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
        if !groups.contains_key(&dir) {
            order.push(dir.clone());
        }
        groups.entry(dir).or_default().push(record);
    }

    // Fold recognized add-on subdirectories into their parent's group.
    // A marker directory with no parent group stays a bundle of its own.
    let mut merged: HashSet<PathBuf> = HashSet::new();
    for dir in &order {
        let Some(name) = dir.file_name() else {
            continue;
        };
        let upper = name.to_string_lossy().to_uppercase();
        if !ADDON_DIR_MARKERS.contains(&upper.as_str()) {
            continue;
        }
        let Some(parent) = dir.parent() else {
            continue;
        };
        if groups.contains_key(parent) && !merged.contains(parent) {
            if let Some(members) = groups.remove(dir) {
                debug!(
                    "Merging add-on directory {} into {}",
                    dir.display(),
                    parent.display()
                );
                if let Some(target) = groups.get_mut(parent) {
                    target.extend(members);
                }
                merged.insert(dir.clone());
            }
        }
    }

    let mut entries: Vec<CatalogEntry> = Vec::new();
    for dir in order {
        if merged.contains(&dir) {
            continue;
        }
        let Some(members) = groups.remove(&dir) else {
            continue;
        };
        if dir == root {
            entries.extend(
                members
                    .into_iter()
                    .map(|r| CatalogEntry::Package(PackageEntry::from_record(r))),
            );
        } else {
            entries.push(CatalogEntry::Bundle(build_bundle(&dir, members, category)));
        }
    }

    entries.sort_by(|a, b| a.sort_title().cmp(b.sort_title()));
    entries
}

fn build_bundle(dir: &Path, mut members: Vec<MetadataRecord>, category: &str) -> BundleEntry {
    // Stable by-rank sort keeps enumeration order within a class
    members.sort_by_key(|r| r.class().rank());

    let icon_path = members
        .iter()
        .find(|r| r.class() == PackageClass::Base && r.icon_path.is_some())
        .and_then(|r| r.icon_path.clone())
        .or_else(|| members.first().and_then(|r| r.icon_path.clone()));

    let total_size: u64 = members.iter().map(|r| r.file_size).sum();

    BundleEntry {
        title: dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        category: category.to_string(),
        icon_path,
        total_size,
        total_size_display: format_file_size(total_size),
        members: members.iter().map(BundleMember::from_record).collect(),
    }
}
