//! Error types for PKG container parsing

use thiserror::Error;

/// Errors that can occur when parsing a PKG container
#[derive(Error, Debug)]
pub enum PkgError {
    /// The first four bytes are not the PKG magic number
    #[error("Unrecognized container format: magic {0:08X}")]
    UnrecognizedFormat(u32),

    /// The file ended before a complete header, table row, or entry payload
    #[error("Truncated container file: {0}")]
    TruncatedFile(String),

    /// The requested entry id is not present in the entry table
    #[error("Entry {0:#06x} not found in container")]
    EntryNotFound(u32),

    /// An entry table row points outside the bounds of the file
    #[error("Entry {id:#06x} out of bounds: offset {offset} + size {size} > file size {file_size}")]
    EntryOutOfBounds {
        /// Entry id of the offending row
        id: u32,
        /// Declared byte offset
        offset: u64,
        /// Declared byte length
        size: u64,
        /// Actual file size
        file_size: u64,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `BinRW` parsing error
    #[error("Binary format error: {0}")]
    BinRw(#[from] binrw::Error),
}

/// Type alias for PKG operation results
pub type Result<T> = std::result::Result<T, PkgError>;
