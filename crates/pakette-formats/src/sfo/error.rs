//! Error types for SFO parameter block parsing

use thiserror::Error;

/// Errors that can occur when strictly parsing an SFO block
#[derive(Error, Debug)]
pub enum SfoError {
    /// The block does not start with the SFO magic number
    #[error("Invalid SFO magic: {0:08X}")]
    BadMagic(u32),

    /// The block ended before the declared structures
    #[error("Truncated SFO block: {0}")]
    Truncated(String),

    /// An index row points outside the block
    #[error("SFO offset out of range: {0}")]
    OutOfRange(String),

    /// `BinRW` parsing error
    #[error("Binary format error: {0}")]
    BinRw(#[from] binrw::Error),
}

/// Type alias for SFO operation results
pub type Result<T> = std::result::Result<T, SfoError>;
