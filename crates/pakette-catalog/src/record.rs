//! Persisted metadata records and retrieval keys
//!
//! One [`MetadataRecord`] is kept per container file, keyed by absolute
//! path in the cache. The retrieval key used for content-addressed lookup
//! is a [`ContentKey`]: the vendor-assigned content identifier when the
//! header carries one, otherwise an md5 hash derived from the absolute
//! path. The sum type makes "exactly one of identifier/hash" a structural
//! invariant instead of a convention.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Content-addressed retrieval key for a container
///
/// Serializes flattened into the record, so the persisted JSON carries
/// exactly one of `content_id` / `path_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKey {
    /// Vendor-assigned content identifier from the container header
    #[serde(rename = "content_id")]
    ContentId(String),
    /// md5 hex digest of the absolute file path, used when no content
    /// identifier is present
    #[serde(rename = "path_hash")]
    PathHash(String),
}

impl ContentKey {
    /// Derive the key for a container: the content identifier when
    /// present and non-empty, otherwise the path hash
    pub fn derive(content_id: Option<&str>, path: &Path) -> Self {
        match content_id {
            Some(id) if !id.is_empty() => Self::ContentId(id.to_string()),
            _ => Self::PathHash(hash_path(path)),
        }
    }

    /// The key string used for lookup
    pub fn as_str(&self) -> &str {
        match self {
            Self::ContentId(s) | Self::PathHash(s) => s,
        }
    }

    /// True when this key is a derived path hash
    pub fn is_path_hash(&self) -> bool {
        matches!(self, Self::PathHash(_))
    }
}

/// md5 hex digest of an absolute path; deterministic per path
fn hash_path(path: &Path) -> String {
    hex::encode(md5::compute(path.to_string_lossy().as_bytes()).0)
}

/// Package classification derived from the SFO `CATEGORY` code
///
/// Determines member ordering inside a bundle: base game data first,
/// patches second, add-on content third, everything else last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PackageClass {
    /// Base game data (`gd`, `gde`)
    Base,
    /// Patch / update content (`gp`)
    Patch,
    /// Additional (add-on) content (`ac`)
    AddOn,
    /// Anything else, including an absent class
    Other,
}

impl PackageClass {
    /// Map a raw SFO class code to a classification
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("gd" | "gde") => Self::Base,
            Some("gp") => Self::Patch,
            Some("ac") => Self::AddOn,
            _ => Self::Other,
        }
    }

    /// Bundle sort rank; lower sorts first
    pub fn rank(self) -> u8 {
        match self {
            Self::Base => 0,
            Self::Patch => 1,
            Self::AddOn => 2,
            Self::Other => 3,
        }
    }
}

/// One cached metadata record per container file
///
/// Optional fields default to absent on deserialization, so records
/// persisted by older versions load cleanly rather than as corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Absolute path of the container file; the cache key
    pub path: PathBuf,
    /// File name component of the path
    pub filename: String,
    /// Configured label of the root directory the file was found under
    pub category: String,
    /// Human-readable title from the parameter block
    #[serde(default)]
    pub title: Option<String>,
    /// Raw SFO class code (`gd`, `gp`, `ac`, ...)
    #[serde(default)]
    pub package_class: Option<String>,
    /// Title identifier from the parameter block
    #[serde(default)]
    pub title_id: Option<String>,
    /// Retrieval key; exactly one of `content_id` / `path_hash`
    #[serde(flatten)]
    pub key: ContentKey,
    /// Icon file name relative to the cache-asset directory
    #[serde(default)]
    pub icon_path: Option<String>,
    /// File size in bytes
    pub file_size: u64,
    /// Human-readable file size
    pub file_size_display: String,
    /// Modification time in nanoseconds since the Unix epoch; the
    /// staleness fingerprint
    pub mtime_ns: u64,
}

impl MetadataRecord {
    /// The content-addressed lookup key for this record
    pub fn retrieval_key(&self) -> &str {
        self.key.as_str()
    }

    /// Classification of this record for bundle ordering
    pub fn class(&self) -> PackageClass {
        PackageClass::from_code(self.package_class.as_deref())
    }
}

/// Format a byte count for presentation: `0B`, `x.xx MB`, or `x.xx GB`
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }
    let gb = bytes as f64 / f64::from(1 << 30);
    if gb >= 1.0 {
        format!("{gb:.2} GB")
    } else {
        format!("{:.2} MB", bytes as f64 / f64::from(1 << 20))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_record(key: ContentKey) -> MetadataRecord {
        MetadataRecord {
            path: PathBuf::from("/pkgs/games/example.pkg"),
            filename: "example.pkg".into(),
            category: "games".into(),
            title: Some("Example Game".into()),
            package_class: Some("gd".into()),
            title_id: Some("CUSA00001".into()),
            key,
            icon_path: Some("UP0000-TEST.png".into()),
            file_size: 4096,
            file_size_display: format_file_size(4096),
            mtime_ns: 1_700_000_000_000_000_000,
        }
    }

    #[test]
    fn test_content_key_prefers_content_id() {
        let key = ContentKey::derive(Some("UP0000-TEST"), Path::new("/a/b.pkg"));
        assert_eq!(key, ContentKey::ContentId("UP0000-TEST".into()));
        assert_eq!(key.as_str(), "UP0000-TEST");
        assert!(!key.is_path_hash());
    }

    #[test]
    fn test_content_key_empty_id_falls_back_to_hash() {
        let key = ContentKey::derive(Some(""), Path::new("/a/b.pkg"));
        assert!(key.is_path_hash());
    }

    #[test]
    fn test_path_hash_deterministic_and_distinct() {
        let a1 = ContentKey::derive(None, Path::new("/a/one.pkg"));
        let a2 = ContentKey::derive(None, Path::new("/a/one.pkg"));
        let b = ContentKey::derive(None, Path::new("/a/two.pkg"));

        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        // md5 hex digests
        assert_eq!(a1.as_str().len(), 32);
    }

    #[test]
    fn test_record_json_carries_exactly_one_key_field() {
        let with_id = sample_record(ContentKey::ContentId("UP0000-TEST".into()));
        let json = serde_json::to_value(&with_id).expect("Should serialize");
        assert_eq!(json["content_id"], "UP0000-TEST");
        assert!(json.get("path_hash").is_none());

        let with_hash = sample_record(ContentKey::PathHash("ab".repeat(16)));
        let json = serde_json::to_value(&with_hash).expect("Should serialize");
        assert!(json.get("content_id").is_none());
        assert_eq!(json["path_hash"], "ab".repeat(16));
    }

    #[test]
    fn test_record_round_trip() {
        let record = sample_record(ContentKey::ContentId("UP0000-TEST".into()));
        let json = serde_json::to_string(&record).expect("Should serialize");
        let parsed: MetadataRecord = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(record, parsed);
    }

    #[test]
    fn test_record_missing_optional_fields_loads_as_absent() {
        // A record persisted before optional fields existed
        let json = r#"{
            "path": "/pkgs/old.pkg",
            "filename": "old.pkg",
            "category": "games",
            "path_hash": "00112233445566778899aabbccddeeff",
            "file_size": 10,
            "file_size_display": "0.00 MB",
            "mtime_ns": 0
        }"#;

        let record: MetadataRecord = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(record.title, None);
        assert_eq!(record.package_class, None);
        assert_eq!(record.title_id, None);
        assert_eq!(record.icon_path, None);
        assert!(record.key.is_path_hash());
    }

    #[test]
    fn test_package_class_ranks() {
        assert_eq!(PackageClass::from_code(Some("gd")), PackageClass::Base);
        assert_eq!(PackageClass::from_code(Some("gde")), PackageClass::Base);
        assert_eq!(PackageClass::from_code(Some("gp")), PackageClass::Patch);
        assert_eq!(PackageClass::from_code(Some("ac")), PackageClass::AddOn);
        assert_eq!(PackageClass::from_code(Some("xx")), PackageClass::Other);
        assert_eq!(PackageClass::from_code(None), PackageClass::Other);

        assert!(PackageClass::Base.rank() < PackageClass::Patch.rank());
        assert!(PackageClass::Patch.rank() < PackageClass::AddOn.rank());
        assert!(PackageClass::AddOn.rank() < PackageClass::Other.rank());
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0B");
        assert_eq!(format_file_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_file_size(512 * 1024), "0.50 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1.00 GB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 / 2), "1.50 GB");
    }
}
