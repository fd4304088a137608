//! Unified error types for attachlog.
//!
//! This module provides a single [`AttachlogError`] enum covering every fatal
//! condition of a run. Recoverable conditions (records whose message type
//! cannot be determined) are not errors; they are reported as
//! [`Diagnostic`](crate::report::Diagnostic) events and skipped.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for attachlog operations.
///
/// # Example
///
/// ```rust
/// use attachlog::error::Result;
///
/// fn count_rows() -> Result<usize> {
///     Ok(0)
/// }
/// ```
pub type Result<T> = std::result::Result<T, AttachlogError>;

/// The error type for all attachlog operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttachlogError {
    /// An I/O error occurred while reading the log or writing the CSV.
    #[error("IO error{}: {source}", path.as_ref().map(|p| format!(" ({})", p.display())).unwrap_or_default())]
    Io {
        /// The underlying I/O error
        #[source]
        source: io::Error,
        /// The file involved, if known
        path: Option<PathBuf>,
    },

    /// The `Attachment[0]` blob of an accepted record is not usable.
    ///
    /// Either it is not valid JSON or it lacks one of the expected keys
    /// (`id`, `url`, `proxyUrl`, `fileName`, `size`). This means the log
    /// format has drifted from the grammar the extractor assumes, so the
    /// run stops instead of emitting defaulted fields.
    #[error("Malformed attachment JSON in message {msgid}: {source}")]
    Attachment {
        /// Message id of the offending record
        msgid: String,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The requested input encoding label is not known.
    #[error("Unknown encoding '{label}'. Expected a WHATWG label such as utf-8, windows-1252 or shift_jis")]
    UnknownEncoding {
        /// The label that was given
        label: String,
    },
}

impl From<io::Error> for AttachlogError {
    fn from(source: io::Error) -> Self {
        AttachlogError::Io { source, path: None }
    }
}

impl AttachlogError {
    /// Creates an I/O error tied to a file path.
    pub fn io(source: io::Error, path: impl Into<PathBuf>) -> Self {
        AttachlogError::Io {
            source,
            path: Some(path.into()),
        }
    }

    /// Creates an attachment error for the given message id.
    pub fn attachment(msgid: impl Into<String>, source: serde_json::Error) -> Self {
        AttachlogError::Attachment {
            msgid: msgid.into(),
            source,
        }
    }

    /// Creates an unknown-encoding error.
    pub fn unknown_encoding(label: impl Into<String>) -> Self {
        AttachlogError::UnknownEncoding {
            label: label.into(),
        }
    }

    /// Returns `true` if this error came from the attachment blob.
    pub fn is_attachment_error(&self) -> bool {
        matches!(self, AttachlogError::Attachment { .. })
    }

    /// Returns `true` if this is an I/O error.
    pub fn is_io_error(&self) -> bool {
        matches!(self, AttachlogError::Io { .. })
    }
}
