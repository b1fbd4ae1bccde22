//! PKG container reader
//!
//! [`PkgFile::open`] parses the header and entry table up front; entry
//! payloads are read on demand. Each [`PkgFile::read_entry`] call performs
//! its own open/seek/read so no file descriptor is held across long
//! catalog passes.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use binrw::BinRead;

use crate::pkg::PKG_MAGIC;
use crate::pkg::entry::{ENTRY_SIZE, PkgEntry};
use crate::pkg::error::{PkgError, Result};
use crate::pkg::header::PkgHeader;

/// An opened PKG container: parsed header plus entry table
///
/// Short-lived by design; created, queried, and discarded within the
/// processing of one file.
#[derive(Debug, Clone)]
pub struct PkgFile {
    path: PathBuf,
    header: PkgHeader,
    content_id: Option<String>,
    entries: HashMap<u32, PkgEntry>,
}

impl PkgFile {
    /// Open and parse a PKG container
    ///
    /// Validates the magic number from the first four bytes before reading
    /// anything else, then parses the header and the full entry table.
    /// Every table row is bounds-checked against the file size. Duplicate
    /// entry ids are permitted by the format; the last row wins.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let file_size = file.metadata()?.len();

        let mut magic_buf = [0u8; 4];
        file.read_exact(&mut magic_buf)
            .map_err(|_| PkgError::TruncatedFile("file shorter than magic number".into()))?;
        let magic = u32::from_be_bytes(magic_buf);
        if magic != PKG_MAGIC {
            return Err(PkgError::UnrecognizedFormat(magic));
        }

        file.seek(SeekFrom::Start(0))?;
        let header = PkgHeader::read(&mut file).map_err(map_short_read("header"))?;
        header.validate()?;

        // The declared row count is untrusted; bound it against the file
        // size before reserving anything based on it.
        let table_end = u64::from(header.entry_table_offset)
            + u64::from(header.entry_count) * ENTRY_SIZE as u64;
        if table_end > file_size {
            return Err(PkgError::TruncatedFile(format!(
                "entry table of {} rows extends past end of file",
                header.entry_count
            )));
        }

        file.seek(SeekFrom::Start(u64::from(header.entry_table_offset)))?;
        let mut entries = HashMap::with_capacity(header.entry_count as usize);
        for _ in 0..header.entry_count {
            let entry = PkgEntry::read(&mut file).map_err(map_short_read("entry table"))?;
            if entry.end_offset() > file_size {
                return Err(PkgError::EntryOutOfBounds {
                    id: entry.id,
                    offset: u64::from(entry.offset),
                    size: u64::from(entry.size),
                    file_size,
                });
            }
            entries.insert(entry.id, entry);
        }

        let content_id = header.content_id_str();

        Ok(Self {
            path: path.to_path_buf(),
            header,
            content_id,
            entries,
        })
    }

    /// Read the raw bytes of an entry by id
    ///
    /// Re-opens the file, seeks to the entry offset, and reads exactly the
    /// declared number of bytes. Returns [`PkgError::EntryNotFound`] when
    /// the id is absent from the table; callers treat that as the feature
    /// being absent, not as a fatal condition.
    pub fn read_entry(&self, id: u32) -> Result<Vec<u8>> {
        let entry = self.entries.get(&id).ok_or(PkgError::EntryNotFound(id))?;

        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(u64::from(entry.offset)))?;
        let mut data = vec![0u8; entry.size as usize];
        file.read_exact(&mut data).map_err(|_| {
            PkgError::TruncatedFile(format!("entry {:#06x} payload short read", id))
        })?;
        Ok(data)
    }

    /// Check whether the entry table contains an id
    pub fn has_entry(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    /// Look up an entry table row by id
    pub fn entry(&self, id: u32) -> Option<&PkgEntry> {
        self.entries.get(&id)
    }

    /// The content identifier from the header, if one was present
    pub fn content_id(&self) -> Option<&str> {
        self.content_id.as_deref()
    }

    /// Path this container was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed container header
    pub fn header(&self) -> &PkgHeader {
        &self.header
    }

    /// Number of rows in the entry table after duplicate collapsing
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Map a binrw error to `TruncatedFile` when it is a short read
///
/// binrw wraps the underlying io error in a backtrace, so the check goes
/// through [`binrw::Error::is_eof`] which inspects the root cause.
fn map_short_read(what: &'static str) -> impl Fn(binrw::Error) -> PkgError {
    move |err| {
        if err.is_eof() {
            PkgError::TruncatedFile(format!("short read in {what}"))
        } else {
            PkgError::BinRw(err)
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pkg::builder::PkgBuilder;
    use crate::pkg::entry_id;
    use crate::pkg::header::HEADER_SIZE;

    fn write_temp(data: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("test.pkg");
        std::fs::write(&path, data).expect("Should write file");
        (dir, path)
    }

    #[test]
    fn test_open_and_read_entry_exact_bytes() {
        let payload = b"param block bytes".to_vec();
        let data = PkgBuilder::new()
            .content_id("UP0000-TEST00000_00-GAME000000000000")
            .add_entry(entry_id::PARAM_SFO, payload.clone())
            .add_entry(entry_id::ICON0, vec![0xAB; 64])
            .build();
        let (_dir, path) = write_temp(&data);

        let pkg = PkgFile::open(&path).expect("Should open container");
        assert_eq!(pkg.entry_count(), 2);
        assert_eq!(
            pkg.content_id(),
            Some("UP0000-TEST00000_00-GAME000000000000")
        );

        let read = pkg
            .read_entry(entry_id::PARAM_SFO)
            .expect("Should read entry");
        assert_eq!(read, payload);

        let entry = pkg.entry(entry_id::PARAM_SFO).expect("Should find entry");
        assert_eq!(entry.size as usize, payload.len());
        // Bytes at the declared offset in the raw file match what read_entry returned
        let at_offset =
            &data[entry.offset as usize..entry.offset as usize + entry.size as usize];
        assert_eq!(at_offset, payload.as_slice());
    }

    #[test]
    fn test_open_bad_magic_fails() {
        let mut data = PkgBuilder::new().build();
        data[0] = 0x00;
        let (_dir, path) = write_temp(&data);

        let err = PkgFile::open(&path).expect_err("Should reject bad magic");
        assert!(matches!(err, PkgError::UnrecognizedFormat(_)));
    }

    #[test]
    fn test_open_bad_magic_short_file() {
        // Wrong magic wins over truncation when four bytes are readable
        let (_dir, path) = write_temp(&[0xDE, 0xAD, 0xBE, 0xEF]);
        let err = PkgFile::open(&path).expect_err("Should reject bad magic");
        assert!(matches!(err, PkgError::UnrecognizedFormat(0xDEAD_BEEF)));
    }

    #[test]
    fn test_open_truncated_header() {
        let data = PkgBuilder::new().build();
        let (_dir, path) = write_temp(&data[..40]);

        let err = PkgFile::open(&path).expect_err("Should reject truncated header");
        assert!(matches!(err, PkgError::TruncatedFile(_)));
    }

    #[test]
    fn test_open_truncated_entry_table() {
        let data = PkgBuilder::new()
            .add_entry(entry_id::PARAM_SFO, vec![1, 2, 3])
            .build();
        // Cut the file in the middle of the entry table
        let (_dir, path) = write_temp(&data[..120]);

        let err = PkgFile::open(&path).expect_err("Should reject truncated table");
        assert!(matches!(err, PkgError::TruncatedFile(_)));
    }

    #[test]
    fn test_huge_entry_count_is_truncated_error() {
        // A bare header claiming u32::MAX table rows must fail with a
        // typed error, not reserve row storage for the declared count
        let mut data = PkgBuilder::new().build();
        data[0x10..0x14].copy_from_slice(&u32::MAX.to_be_bytes());
        let (_dir, path) = write_temp(&data);

        let err = PkgFile::open(&path).expect_err("Should reject bogus entry count");
        assert!(matches!(err, PkgError::TruncatedFile(_)));
    }

    #[test]
    fn test_entry_count_exceeding_file_is_truncated_error() {
        // One declared row more than the file actually holds
        let data = PkgBuilder::new()
            .add_entry(entry_id::PARAM_SFO, vec![0u8; 4])
            .build();
        let mut patched = data.clone();
        patched[0x10..0x14].copy_from_slice(&2u32.to_be_bytes());
        let (_dir, path) = write_temp(&patched[..HEADER_SIZE + ENTRY_SIZE]);

        let err = PkgFile::open(&path).expect_err("Should reject overdeclared table");
        assert!(matches!(err, PkgError::TruncatedFile(_)));
    }

    #[test]
    fn test_entry_out_of_bounds_is_parse_error() {
        let data = PkgBuilder::new()
            .add_raw_entry(entry_id::PARAM_SFO, 0xFFFF_0000, 0x1000)
            .build();
        let (_dir, path) = write_temp(&data);

        let err = PkgFile::open(&path).expect_err("Should reject out-of-bounds entry");
        assert!(matches!(err, PkgError::EntryOutOfBounds { .. }));
    }

    #[test]
    fn test_duplicate_entry_id_last_wins() {
        let data = PkgBuilder::new()
            .add_entry(entry_id::PARAM_SFO, b"first".to_vec())
            .add_entry(entry_id::PARAM_SFO, b"second".to_vec())
            .build();
        let (_dir, path) = write_temp(&data);

        let pkg = PkgFile::open(&path).expect("Should open container");
        assert_eq!(pkg.entry_count(), 1);
        let read = pkg
            .read_entry(entry_id::PARAM_SFO)
            .expect("Should read entry");
        assert_eq!(read, b"second");
    }

    #[test]
    fn test_missing_entry_is_not_found() {
        let data = PkgBuilder::new()
            .add_entry(entry_id::PARAM_SFO, vec![0u8; 8])
            .build();
        let (_dir, path) = write_temp(&data);

        let pkg = PkgFile::open(&path).expect("Should open container");
        assert!(!pkg.has_entry(entry_id::ICON0));
        let err = pkg
            .read_entry(entry_id::ICON0)
            .expect_err("Should fail for missing entry");
        assert!(matches!(err, PkgError::EntryNotFound(id) if id == entry_id::ICON0));
    }

    #[test]
    fn test_absent_content_id() {
        let data = PkgBuilder::new().build();
        let (_dir, path) = write_temp(&data);

        let pkg = PkgFile::open(&path).expect("Should open container");
        assert_eq!(pkg.content_id(), None);
    }
}
