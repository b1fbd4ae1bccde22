//! File format parsers and builders for console package containers
//!
//! This crate provides parsing and building support for the two binary
//! formats a package catalog needs to understand:
//!
//! - **PKG**: the big-endian container format holding embedded sub-resources
//!   (parameter block, icon, payload) addressed through a fixed entry table.
//!   Payload entries stay encrypted; the parser only locates and extracts
//!   raw entry bytes.
//! - **SFO**: the little-endian key/value parameter block embedded inside a
//!   container, holding human-readable title and classification fields.
//!
//! # Design Principles
//!
//! - **Symmetric Operations**: Both parsing and building supported
//! - **Type Safety**: Use Rust's type system to enforce invariants
//! - **Lenient Metadata**: absence of metadata is common and must not abort
//!   processing of an otherwise valid container

#![warn(missing_docs)]

/// PKG container format: header, entry table, and on-demand entry extraction
pub mod pkg;

/// SFO parameter block format: key/value metadata embedded in a container
pub mod sfo;
