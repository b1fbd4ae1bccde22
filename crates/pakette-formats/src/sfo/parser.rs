//! SFO block decoding
//!
//! The catalog-facing entry point is [`parse`], which is lenient: a bad
//! magic number or a malformed index row yields whatever fields were
//! already decoded instead of an error. Partial metadata is preferable to
//! aborting the enclosing file's processing. [`parse_strict`] surfaces the
//! typed failure instead.

use binrw::BinRead;
use binrw::io::Cursor;

use crate::sfo::entry::{INDEX_ENTRY_SIZE, SfoIndexEntry};
use crate::sfo::error::{Result, SfoError};
use crate::sfo::fields::SfoFields;
use crate::sfo::header::{HEADER_SIZE, SfoHeader};

/// Decode an SFO block leniently
///
/// Never fails: a block with a mismatched magic number yields empty
/// fields, and a decode failure partway through yields the fields decoded
/// up to that point.
pub fn parse(data: &[u8]) -> SfoFields {
    let mut fields = SfoFields::default();
    let _ = decode(data, &mut fields);
    fields
}

/// Decode an SFO block, surfacing the first failure
pub fn parse_strict(data: &[u8]) -> Result<SfoFields> {
    let mut fields = SfoFields::default();
    decode(data, &mut fields)?;
    Ok(fields)
}

fn decode(data: &[u8], fields: &mut SfoFields) -> Result<()> {
    if data.len() < HEADER_SIZE {
        return Err(SfoError::Truncated(format!(
            "block is {} bytes, header needs {HEADER_SIZE}",
            data.len()
        )));
    }
    let header = SfoHeader::read(&mut Cursor::new(data))?;
    header.validate()?;

    let key_table = header.key_table_offset as usize;
    let data_table = header.data_table_offset as usize;

    for i in 0..header.entry_count as usize {
        let row_start = HEADER_SIZE + i * INDEX_ENTRY_SIZE;
        let row_end = row_start + INDEX_ENTRY_SIZE;
        if row_end > data.len() {
            return Err(SfoError::Truncated(format!(
                "index row {i} extends past block end"
            )));
        }
        let entry = SfoIndexEntry::read(&mut Cursor::new(&data[row_start..row_end]))?;

        let key = read_key(data, key_table, entry.key_offset as usize)
            .ok_or_else(|| SfoError::OutOfRange(format!("key offset of row {i}")))?;
        let value = read_value(data, data_table, &entry)
            .ok_or_else(|| SfoError::OutOfRange(format!("data offset of row {i}")))?;

        fields.set(&key, value);
    }

    Ok(())
}

/// Read a NUL-terminated key from the key table; NUL-less tails run to the
/// end of the block
fn read_key(data: &[u8], key_table: usize, key_offset: usize) -> Option<String> {
    let start = key_table.checked_add(key_offset)?;
    if start > data.len() {
        return None;
    }
    let tail = &data[start..];
    let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
    Some(String::from_utf8_lossy(&tail[..end]).into_owned())
}

/// Read a value slot, strip trailing NUL padding, decode lossily
fn read_value(data: &[u8], data_table: usize, entry: &SfoIndexEntry) -> Option<String> {
    let start = data_table.checked_add(entry.data_offset as usize)?;
    let end = start.checked_add(entry.data_len as usize)?;
    if end > data.len() {
        return None;
    }
    let mut slice = &data[start..end];
    while let [rest @ .., 0] = slice {
        slice = rest;
    }
    Some(String::from_utf8_lossy(slice).into_owned())
}
