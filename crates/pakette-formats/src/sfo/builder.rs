//! Builder for SFO parameter blocks
//!
//! Produces well-formed block bytes for fixtures and tests: header, index
//! table, key table, then data table, with offsets computed from the
//! fields added in insertion order.

use binrw::BinWrite;
use binrw::io::Cursor;

use crate::sfo::entry::{INDEX_ENTRY_SIZE, SfoIndexEntry};
use crate::sfo::header::{HEADER_SIZE, SfoHeader};

struct BuilderField {
    key: String,
    value: Vec<u8>,
    slot_size: usize,
}

/// Builder for SFO block bytes
#[derive(Default)]
pub struct SfoBuilder {
    fields: Vec<BuilderField>,
}

impl SfoBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a NUL-terminated string field
    #[must_use]
    pub fn field(self, key: &str, value: &str) -> Self {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);
        let slot = bytes.len();
        self.raw_field_with_slot(key, bytes, slot)
    }

    /// Add a string field padded with NULs to a fixed slot size
    #[must_use]
    pub fn padded_field(self, key: &str, value: &str, slot_size: usize) -> Self {
        let mut bytes = value.as_bytes().to_vec();
        bytes.resize(slot_size.max(bytes.len()), 0);
        let slot = bytes.len();
        self.raw_field_with_slot(key, bytes, slot)
    }

    /// Add a field with arbitrary value bytes
    #[must_use]
    pub fn raw_field(self, key: &str, value: Vec<u8>) -> Self {
        let slot = value.len();
        self.raw_field_with_slot(key, value, slot)
    }

    #[must_use]
    fn raw_field_with_slot(mut self, key: &str, value: Vec<u8>, slot_size: usize) -> Self {
        self.fields.push(BuilderField {
            key: key.to_string(),
            value,
            slot_size,
        });
        self
    }

    /// Serialize the block to bytes
    pub fn build(self) -> Vec<u8> {
        let key_table_offset = HEADER_SIZE + self.fields.len() * INDEX_ENTRY_SIZE;

        let mut key_table: Vec<u8> = Vec::new();
        let mut key_offsets = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            key_offsets.push(key_table.len() as u16);
            key_table.extend_from_slice(field.key.as_bytes());
            key_table.push(0);
        }

        let data_table_offset = key_table_offset + key_table.len();

        let mut data_table: Vec<u8> = Vec::new();
        let mut rows = Vec::with_capacity(self.fields.len());
        for (field, key_offset) in self.fields.iter().zip(key_offsets) {
            rows.push(SfoIndexEntry::new(
                key_offset,
                field.value.len() as u32,
                field.slot_size as u32,
                data_table.len() as u32,
            ));
            data_table.extend_from_slice(&field.value);
            data_table.resize(data_table.len() + (field.slot_size - field.value.len()), 0);
        }

        let header = SfoHeader::new(
            key_table_offset as u32,
            data_table_offset as u32,
            rows.len() as u32,
        );

        let mut buffer = Vec::with_capacity(data_table_offset + data_table.len());
        let mut cursor = Cursor::new(&mut buffer);
        // Writing fixed-size structs to a Vec cannot fail
        let _ = header.write(&mut cursor);
        for row in &rows {
            let _ = row.write(&mut cursor);
        }
        buffer.extend_from_slice(&key_table);
        buffer.extend_from_slice(&data_table);
        buffer
    }
}
