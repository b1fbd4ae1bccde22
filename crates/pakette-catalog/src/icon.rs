//! Icon extraction into the cache-asset directory
//!
//! Reads the icon entry out of an opened container, decodes it, and
//! re-encodes it as PNG under the asset directory. Every failure path
//! yields `None`: a missing or undecodable icon must never fail the
//! enclosing file's scan.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use pakette_formats::pkg::{PkgFile, entry_id};
use tracing::debug;

/// Characters that are replaced with `_` in icon file names
const ILLEGAL_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Writes container icons as PNG files under a cache-asset directory
#[derive(Debug, Clone)]
pub struct IconExtractor {
    asset_dir: PathBuf,
}

impl IconExtractor {
    /// Create an extractor writing under `asset_dir`
    pub fn new(asset_dir: PathBuf) -> Self {
        Self { asset_dir }
    }

    /// The cache-asset directory icons are written to
    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    /// Extract the container's icon, returning the file name relative to
    /// the asset directory
    ///
    /// Returns `None` when the container has no icon entry, when
    /// `base_name` sanitizes to nothing, or when reading, decoding,
    /// re-encoding, or writing fails.
    pub fn extract(&self, pkg: &PkgFile, base_name: &str) -> Option<String> {
        let name = sanitize_file_name(base_name)?;
        if !pkg.has_entry(entry_id::ICON0) {
            return None;
        }

        let bytes = match pkg.read_entry(entry_id::ICON0) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("Failed to read icon entry from {}: {err}", pkg.path().display());
                return None;
            }
        };
        let decoded = match image::load_from_memory(&bytes) {
            Ok(img) => img,
            Err(err) => {
                debug!("Failed to decode icon from {}: {err}", pkg.path().display());
                return None;
            }
        };

        if let Err(err) = std::fs::create_dir_all(&self.asset_dir) {
            debug!("Failed to create asset dir {}: {err}", self.asset_dir.display());
            return None;
        }

        let file_name = format!("{name}.png");
        let target = self.asset_dir.join(&file_name);
        match decoded.save_with_format(&target, ImageFormat::Png) {
            Ok(()) => Some(file_name),
            Err(err) => {
                debug!("Failed to write icon {}: {err}", target.display());
                None
            }
        }
    }
}

/// Sanitize a retrieval key into a usable file name stem
///
/// Strips NUL bytes, trims whitespace, and replaces characters illegal in
/// file names with `_`. Returns `None` when nothing usable remains.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .filter(|&c| c != '\0')
        .map(|c| if ILLEGAL_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
