//! PKG container format (`0x7F434E54` magic)
//!
//! A PKG file is a fixed-layout big-endian archive: a 112-byte header,
//! an entry table of 32-byte rows, and raw entry payloads addressed by
//! absolute byte offset. The catalog only needs two embedded entries:
//!
//! - `0x1000` — the SFO parameter block (title, class, title id)
//! - `0x1200` — the primary icon image
//!
//! Payload entries are encrypted and are never decrypted here; the parser
//! locates entries and extracts their raw bytes on demand.
//!
//! # Usage
//!
//! ```rust,no_run
//! use pakette_formats::pkg::{PkgFile, entry_id};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pkg = PkgFile::open("game.pkg")?;
//! if let Some(id) = pkg.content_id() {
//!     println!("content id: {id}");
//! }
//! let sfo_bytes = pkg.read_entry(entry_id::PARAM_SFO)?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod entry;
pub mod error;
pub mod file;
pub mod header;

// Re-export main types
pub use builder::PkgBuilder;
pub use entry::{PkgEntry, entry_id};
pub use error::{PkgError, Result};
pub use file::PkgFile;
pub use header::PkgHeader;

/// Magic number identifying a PKG container (big-endian `0x7F434E54`)
pub const PKG_MAGIC: u32 = 0x7F43_4E54;
