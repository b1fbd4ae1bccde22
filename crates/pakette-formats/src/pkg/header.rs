//! PKG container header parsing and building
//!
//! The header is 112 bytes, all multi-byte fields big-endian. Only the
//! entry count, entry-table offset, and content id matter to the catalog;
//! the remaining fields are carried through verbatim so a built header
//! round-trips byte for byte.

use crate::pkg::PKG_MAGIC;
use crate::pkg::error::{PkgError, Result};
use binrw::{BinRead, BinWrite};

/// Size of the fixed PKG header in bytes
pub const HEADER_SIZE: usize = 112;

/// PKG container header (112 bytes, big-endian)
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[br(big)]
#[bw(big)]
pub struct PkgHeader {
    /// Magic number, always `0x7F434E54`
    pub magic: u32,
    /// Container flags (encryption and revision bits, unused here)
    pub flags: u32,
    /// Unknown field at 0x08
    pub unk_0x08: u32,
    /// Unknown field at 0x0C
    pub unk_0x0c: u32,
    /// Number of rows in the entry table
    pub entry_count: u32,
    /// Number of system entries
    pub sc_entry_count: u16,
    /// Secondary entry count (mirrors `entry_count` in practice)
    pub body_entry_count: u16,
    /// Absolute byte offset of the entry table
    pub entry_table_offset: u32,
    /// Total byte size of entry payload data
    pub entry_data_size: u32,
    /// Absolute byte offset of the container body
    pub body_offset: u64,
    /// Byte size of the container body
    pub body_size: u64,
    /// Absolute byte offset of the encrypted content segment
    pub content_offset: u64,
    /// Byte size of the encrypted content segment
    pub content_size: u64,
    /// Content identifier, NUL-padded ASCII
    pub content_id: [u8; 36],
    /// Reserved padding
    pub padding: [u8; 12],
}

impl PkgHeader {
    /// Validate the header fields
    pub fn validate(&self) -> Result<()> {
        if self.magic != PKG_MAGIC {
            return Err(PkgError::UnrecognizedFormat(self.magic));
        }
        Ok(())
    }

    /// Decode the content identifier field
    ///
    /// The raw field is NUL-padded ASCII; control bytes are stripped and
    /// the result trimmed. Returns `None` when nothing printable remains.
    pub fn content_id_str(&self) -> Option<String> {
        let cleaned: String = self
            .content_id
            .iter()
            .filter(|b| !b.is_ascii_control())
            .map(|&b| char::from(b))
            .collect();
        let trimmed = cleaned.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use binrw::io::Cursor;

    fn sample_header() -> PkgHeader {
        let mut content_id = [0u8; 36];
        content_id[..19].copy_from_slice(b"UP0000-TEST00000_00");
        PkgHeader {
            magic: PKG_MAGIC,
            flags: 0x8000_0000,
            unk_0x08: 0,
            unk_0x0c: 0,
            entry_count: 3,
            sc_entry_count: 0,
            body_entry_count: 3,
            entry_table_offset: 112,
            entry_data_size: 0,
            body_offset: 0,
            body_size: 0,
            content_offset: 0,
            content_size: 0,
            content_id,
            padding: [0u8; 12],
        }
    }

    #[test]
    fn test_header_round_trip() {
        let header = sample_header();

        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        header.write(&mut cursor).expect("Should write header");
        assert_eq!(buffer.len(), HEADER_SIZE);

        let parsed = PkgHeader::read(&mut Cursor::new(&buffer)).expect("Should parse header");
        assert_eq!(header, parsed);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_header_big_endian_layout() {
        let header = sample_header();

        let mut buffer = Vec::new();
        header
            .write(&mut Cursor::new(&mut buffer))
            .expect("Should write header");

        // Magic at 0x00, entry_count at 0x10, table offset at 0x18
        assert_eq!(&buffer[0..4], &[0x7F, 0x43, 0x4E, 0x54]);
        assert_eq!(&buffer[0x10..0x14], &3u32.to_be_bytes());
        assert_eq!(&buffer[0x18..0x1C], &112u32.to_be_bytes());
        // Content id field starts at 0x40
        assert_eq!(&buffer[0x40..0x45], b"UP000");
    }

    #[test]
    fn test_validate_rejects_bad_magic() {
        let mut header = sample_header();
        header.magic = 0xDEAD_BEEF;
        assert!(matches!(
            header.validate(),
            Err(PkgError::UnrecognizedFormat(0xDEAD_BEEF))
        ));
    }

    #[test]
    fn test_content_id_trimmed() {
        let header = sample_header();
        assert_eq!(
            header.content_id_str().expect("Should have content id"),
            "UP0000-TEST00000_00"
        );
    }

    #[test]
    fn test_content_id_all_nul_is_absent() {
        let mut header = sample_header();
        header.content_id = [0u8; 36];
        assert_eq!(header.content_id_str(), None);
    }

    #[test]
    fn test_content_id_whitespace_only_is_absent() {
        let mut header = sample_header();
        header.content_id = [0u8; 36];
        header.content_id[..3].copy_from_slice(b"   ");
        assert_eq!(header.content_id_str(), None);
    }
}
