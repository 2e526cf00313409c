// src/input/mod.rs

//! Parsing of the raw tree document.
//!
//! The parsed [`RawTreeDocument`] is the canonical stored source: repair and
//! injection operate on graphs built from it and never write back.

pub mod encoding;
pub mod raw;

use std::path::Path;

use tracing::debug;

use crate::errors::{Result, SpellTreeError};
use crate::fs::FileSystem;

pub use encoding::{decode_document, sanitize_windows_1252};
pub use raw::{RawNode, RawSchool, RawTreeDocument};

/// Parse a tree document from text.
///
/// Fails on malformed JSON and on a document without a `schools` mapping.
pub fn parse_document(text: &str) -> Result<RawTreeDocument> {
    let doc: RawTreeDocument = serde_json::from_str(text)?;
    if doc.schools.is_none() {
        return Err(SpellTreeError::MissingSchools);
    }
    debug!(
        schools = doc.schools.as_ref().map(|s| s.len()).unwrap_or(0),
        "parsed tree document"
    );
    Ok(doc)
}

/// Parse a tree document from raw bytes, see [`decode_document`].
pub fn parse_document_bytes(bytes: &[u8], sanitize: bool) -> Result<RawTreeDocument> {
    let text = decode_document(bytes, sanitize)?;
    parse_document(&text)
}

/// Read and parse a tree document through the given filesystem.
pub fn load_document(fs: &dyn FileSystem, path: &Path, sanitize: bool) -> Result<RawTreeDocument> {
    let bytes = fs.read_bytes(path).map_err(SpellTreeError::Other)?;
    parse_document_bytes(&bytes, sanitize)
}
