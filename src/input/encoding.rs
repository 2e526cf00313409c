// src/input/encoding.rs

//! Byte-level decoding of tree documents.
//!
//! Mod-authored spell names frequently carry Windows-1252 punctuation that
//! is not valid UTF-8. Only bytes that break UTF-8 decoding are remapped:
//! to ASCII look-alikes where one exists, otherwise read as Latin-1.

use std::borrow::Cow;

use tracing::warn;

use crate::errors::{Result, SpellTreeError};

/// Decode `bytes` as UTF-8, falling back to [`sanitize_windows_1252`] when
/// `sanitize` is set.
pub fn decode_document(bytes: &[u8], sanitize: bool) -> Result<Cow<'_, str>> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(err) if sanitize => {
            warn!(
                valid_up_to = err.valid_up_to(),
                "tree document is not valid UTF-8; sanitizing as Windows-1252"
            );
            Ok(Cow::Owned(sanitize_windows_1252(bytes)))
        }
        Err(err) => Err(SpellTreeError::InvalidEncoding(format!(
            "invalid UTF-8 at byte {}",
            err.valid_up_to()
        ))),
    }
}

/// Decode `bytes` as UTF-8, reinterpreting only the invalid byte runs as
/// Windows-1252. Valid multi-byte sequences anywhere in the input survive.
pub fn sanitize_windows_1252(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;

    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(text) => {
                out.push_str(text);
                break;
            }
            Err(err) => {
                let (valid, after) = rest.split_at(err.valid_up_to());
                // `valid` is the prefix from_utf8 just accepted.
                out.push_str(&String::from_utf8_lossy(valid));

                // `None` means the input ends mid-sequence.
                let bad_len = err.error_len().unwrap_or(after.len());
                let (bad, tail) = after.split_at(bad_len);
                for &b in bad {
                    push_windows_1252(&mut out, b);
                }
                rest = tail;
            }
        }
    }

    out
}

fn push_windows_1252(out: &mut String, b: u8) {
    match b {
        0x00..=0x7F => out.push(b as char),
        0x91 | 0x92 => out.push('\''),
        0x93 | 0x94 => out.push('"'),
        0x96 | 0x97 => out.push('-'),
        0x85 => out.push_str("..."),
        0x99 => out.push_str("(TM)"),
        0x80..=0x9F => out.push('?'),
        // Latin-1 maps 1:1 onto U+00A0..U+00FF.
        _ => out.push(char::from(b)),
    }
}
