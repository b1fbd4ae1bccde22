//! SFO parameter block format (`0x46535000` magic)
//!
//! The parameter block is a little-endian key/value table embedded in a
//! container entry: a 20-byte header, an index table of 16-byte rows, a
//! NUL-separated key table, and a data table. Only three keys carry
//! catalog meaning (`TITLE`, `CATEGORY`, `TITLE_ID`); everything else is
//! ignored.
//!
//! Absence of metadata is common, so the primary entry point is lenient:
//! [`parse`] returns whatever fields could be decoded and never fails.
//! [`parse_strict`] exposes typed errors for diagnostics and tests.
//!
//! # Usage
//!
//! ```rust
//! use pakette_formats::sfo::{SfoBuilder, parse};
//!
//! let block = SfoBuilder::new()
//!     .field("TITLE", "Example Game")
//!     .field("CATEGORY", "gd")
//!     .build();
//!
//! let fields = parse(&block);
//! assert_eq!(fields.title.as_deref(), Some("Example Game"));
//! ```

pub mod builder;
pub mod entry;
pub mod error;
pub mod fields;
pub mod header;
pub mod parser;

// Re-export main types
pub use builder::SfoBuilder;
pub use entry::SfoIndexEntry;
pub use error::{Result, SfoError};
pub use fields::SfoFields;
pub use header::SfoHeader;
pub use parser::{parse, parse_strict};

/// Magic number identifying an SFO block (little-endian `0x46535000`)
pub const SFO_MAGIC: u32 = 0x4653_5000;
