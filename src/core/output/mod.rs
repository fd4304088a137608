//! Output writers.
//!
//! Accepted records are written as CSV, one row per record, through
//! [`CsvSink`]. The column set and order ([`COLUMNS`](crate::core::models::COLUMNS))
//! are a stable contract: the file is meant to be reviewed and then fed to a
//! batch downloader.
//!
//! # Example
//!
//! ```rust
//! use attachlog::core::output::CsvSink;
//!
//! let sink = CsvSink::new(Vec::new())?;
//! let bytes = sink.into_inner()?;
//! assert!(String::from_utf8(bytes).unwrap().starts_with("msgtype,msgid,"));
//! # Ok::<(), attachlog::AttachlogError>(())
//! ```

mod csv_writer;

pub use csv_writer::{CsvSink, STDOUT_PATH, create_output};
