//! SFO block header parsing and building

use crate::sfo::SFO_MAGIC;
use crate::sfo::error::{Result, SfoError};
use binrw::{BinRead, BinWrite};

/// Size of the SFO header in bytes
pub const HEADER_SIZE: usize = 20;

/// SFO block header (20 bytes, little-endian)
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct SfoHeader {
    /// Magic number, always `0x46535000`
    pub magic: u32,
    /// Format version field (not interpreted)
    pub version: u32,
    /// Byte offset of the key table from the start of the block
    pub key_table_offset: u32,
    /// Byte offset of the data table from the start of the block
    pub data_table_offset: u32,
    /// Number of index rows
    pub entry_count: u32,
}

impl SfoHeader {
    /// Create a header for a block with the given table layout
    pub fn new(key_table_offset: u32, data_table_offset: u32, entry_count: u32) -> Self {
        Self {
            magic: SFO_MAGIC,
            version: 0x0101,
            key_table_offset,
            data_table_offset,
            entry_count,
        }
    }

    /// Validate the magic number
    pub fn validate(&self) -> Result<()> {
        if self.magic != SFO_MAGIC {
            return Err(SfoError::BadMagic(self.magic));
        }
        Ok(())
    }
}
