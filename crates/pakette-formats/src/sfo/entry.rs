//! SFO index table rows
//!
//! Sixteen bytes each, little-endian, starting immediately after the
//! header. `key_offset` is relative to the key table; `data_offset` and
//! lengths are relative to the data table.

use binrw::{BinRead, BinWrite};

/// Size of one index row in bytes
pub const INDEX_ENTRY_SIZE: usize = 16;

/// One row of the SFO index table (16 bytes, little-endian)
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct SfoIndexEntry {
    /// Offset of the NUL-terminated key within the key table
    pub key_offset: u16,
    /// Value encoding (UTF-8 string, integer); not interpreted
    pub data_format: u16,
    /// Used byte length of the value
    pub data_len: u32,
    /// Allocated byte length of the value slot
    pub data_max_len: u32,
    /// Offset of the value within the data table
    pub data_offset: u32,
}

impl SfoIndexEntry {
    /// Create an index row for a UTF-8 string value
    pub fn new(key_offset: u16, data_len: u32, data_max_len: u32, data_offset: u32) -> Self {
        Self {
            key_offset,
            data_format: 0x0204,
            data_len,
            data_max_len,
            data_offset,
        }
    }
}
