//! PKG entry table rows
//!
//! Each row is 32 bytes, big-endian: entry id, filename-table offset, two
//! flag words, the payload's absolute byte offset and size, then padding.
//! Offsets are relative to the start of the container file.

use binrw::{BinRead, BinWrite};

/// Well-known entry ids
pub mod entry_id {
    /// SFO parameter block (title, class, title id)
    pub const PARAM_SFO: u32 = 0x1000;
    /// Primary icon image
    pub const ICON0: u32 = 0x1200;
}

/// Size of one entry table row in bytes
pub const ENTRY_SIZE: usize = 32;

/// One row of a PKG entry table (32 bytes, big-endian)
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[br(big)]
#[bw(big)]
pub struct PkgEntry {
    /// Entry type identifier
    pub id: u32,
    /// Offset into the filename table (unused by the catalog)
    pub filename_offset: u32,
    /// First flag word
    pub flags1: u32,
    /// Second flag word
    pub flags2: u32,
    /// Absolute byte offset of the entry payload
    pub offset: u32,
    /// Byte size of the entry payload
    pub size: u32,
    /// Reserved padding
    pub padding: u64,
}

impl PkgEntry {
    /// Create an entry row with zeroed flags and padding
    pub fn new(id: u32, offset: u32, size: u32) -> Self {
        Self {
            id,
            filename_offset: 0,
            flags1: 0,
            flags2: 0,
            offset,
            size,
            padding: 0,
        }
    }

    /// Exclusive end offset of the payload within the container
    pub fn end_offset(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.size)
    }
}
