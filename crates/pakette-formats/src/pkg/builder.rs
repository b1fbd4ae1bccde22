//! Builder for synthetic PKG containers
//!
//! Produces complete, well-formed container bytes for fixtures and tests:
//! header, entry table, then entry payloads packed in insertion order.
//! Existing containers are never modified; the builder only creates new
//! byte buffers.

use binrw::BinWrite;
use binrw::io::Cursor;

use crate::pkg::PKG_MAGIC;
use crate::pkg::entry::{ENTRY_SIZE, PkgEntry};
use crate::pkg::header::{HEADER_SIZE, PkgHeader};

enum BuilderEntry {
    Payload { id: u32, data: Vec<u8> },
    Raw { id: u32, offset: u32, size: u32 },
}

/// Builder for PKG container bytes
#[derive(Default)]
pub struct PkgBuilder {
    content_id: Option<String>,
    entries: Vec<BuilderEntry>,
}

impl PkgBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            content_id: None,
            entries: Vec::new(),
        }
    }

    /// Set the 36-byte content identifier field (truncated if longer)
    #[must_use]
    pub fn content_id(mut self, id: &str) -> Self {
        self.content_id = Some(id.to_string());
        self
    }

    /// Add an entry with a payload; offset and size are computed at build
    #[must_use]
    pub fn add_entry(mut self, id: u32, data: Vec<u8>) -> Self {
        self.entries.push(BuilderEntry::Payload { id, data });
        self
    }

    /// Add a table row with an explicit offset and size and no payload
    ///
    /// Useful for constructing malformed containers in tests.
    #[must_use]
    pub fn add_raw_entry(mut self, id: u32, offset: u32, size: u32) -> Self {
        self.entries.push(BuilderEntry::Raw { id, offset, size });
        self
    }

    /// Serialize the container to bytes
    pub fn build(self) -> Vec<u8> {
        let table_offset = HEADER_SIZE;
        let payload_base = table_offset + self.entries.len() * ENTRY_SIZE;

        let mut rows = Vec::with_capacity(self.entries.len());
        let mut payloads: Vec<u8> = Vec::new();
        for entry in &self.entries {
            match entry {
                BuilderEntry::Payload { id, data } => {
                    let offset = (payload_base + payloads.len()) as u32;
                    rows.push(PkgEntry::new(*id, offset, data.len() as u32));
                    payloads.extend_from_slice(data);
                }
                BuilderEntry::Raw { id, offset, size } => {
                    rows.push(PkgEntry::new(*id, *offset, *size));
                }
            }
        }

        let mut content_id = [0u8; 36];
        if let Some(id) = &self.content_id {
            let bytes = id.as_bytes();
            let len = bytes.len().min(36);
            content_id[..len].copy_from_slice(&bytes[..len]);
        }

        let header = PkgHeader {
            magic: PKG_MAGIC,
            flags: 0,
            unk_0x08: 0,
            unk_0x0c: 0,
            entry_count: rows.len() as u32,
            sc_entry_count: 0,
            body_entry_count: rows.len() as u16,
            entry_table_offset: table_offset as u32,
            entry_data_size: payloads.len() as u32,
            body_offset: payload_base as u64,
            body_size: payloads.len() as u64,
            content_offset: 0,
            content_size: 0,
            content_id,
            padding: [0u8; 12],
        };

        let mut buffer = Vec::with_capacity(payload_base + payloads.len());
        let mut cursor = Cursor::new(&mut buffer);
        // Writing fixed-size structs to a Vec cannot fail
        let _ = header.write(&mut cursor);
        for row in &rows {
            let _ = row.write(&mut cursor);
        }
        buffer.extend_from_slice(&payloads);
        buffer
    }
}
