//! Error types for catalog operations
//!
//! Per-file failures never abort an enclosing scan; they are logged and
//! the file is skipped. Cache-level failures degrade (empty cache on
//! load, unpersisted save plus a log event) rather than halting.

use thiserror::Error;

/// Errors that can occur during catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Container parsing failed for a single file
    #[error("Container format error: {0}")]
    Format(#[from] pakette_formats::pkg::PkgError),

    /// The persisted cache could not be serialized or deserialized
    #[error("Cache serialization error: {0}")]
    CacheFormat(#[from] serde_json::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
