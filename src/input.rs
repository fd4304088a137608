//! Reading monitor logs into memory.
//!
//! The whole file is read before scanning starts; logs are assumed to fit in
//! memory. Decoding never fails on bad bytes: malformed sequences become
//! U+FFFD so a stray byte cannot abort a long extraction.

use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{AttachlogError, Result};

/// Resolves an encoding label, `None` meaning UTF-8.
///
/// Labels follow the WHATWG Encoding Standard (`utf-8`, `latin1`,
/// `windows-1252`, `shift_jis`, `utf-16le`, ...), case-insensitive.
pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    match label {
        None => Ok(UTF_8),
        Some(label) => Encoding::for_label(label.as_bytes())
            .ok_or_else(|| AttachlogError::unknown_encoding(label)),
    }
}

/// Decodes raw log bytes.
///
/// A byte order mark, if present, wins over `label`.
pub fn decode(bytes: &[u8], label: Option<&str>) -> Result<String> {
    let encoding = resolve_encoding(label)?;
    let (text, _, _) = encoding.decode(bytes);
    Ok(text.into_owned())
}

/// Reads and decodes the log at `path`.
pub fn read_log(path: impl AsRef<Path>, label: Option<&str>) -> Result<String> {
    let path = path.as_ref();
    // Resolve first so a bad label fails before touching the file.
    resolve_encoding(label)?;
    let bytes = fs::read(path).map_err(|e| AttachlogError::io(e, path))?;
    decode(&bytes, label)
}
