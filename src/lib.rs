//! # attachlog
//!
//! Extracts attachment metadata (URLs, file names, sizes) from DiscordMonitor
//! verbose logs, filters it by where each message came from, and writes the
//! result as CSV for review and batch downloading.
//!
//! ## Overview
//!
//! The pipeline runs in a single pass:
//!
//! 1. [`extract`] scans the log text for guild, DM and group message blocks
//!    that carry an `Attachment[0]` and yields [`LogRecord`]s in document
//!    order.
//! 2. [`core::filter`] accepts or rejects each record by message kind
//!    (include/exclude) and by target names (group, guild, channel, user).
//! 3. [`core::processor`] parses the attachment JSON of accepted records and
//!    writes one [`OutputRow`](core::models::OutputRow) per record.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use attachlog::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = ExtractConfig::new()
//!         .with_filter(FilterConfig::new().exclude(MessageKind::Guild).with_user("alice"));
//!
//!     let stats = extract_file("monitor.log", "attachments.csv", &config, &no_report())?;
//!     println!("{} rows written", stats.written);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`record`] - [`LogRecord`], [`Origin`](record::Origin), [`MessageKind`](record::MessageKind)
//! - [`extract`] - the record pattern and [`RecordExtractor`](extract::RecordExtractor)
//! - [`attachment`] - [`Attachment`](attachment::Attachment) parsed from JSON blobs
//! - [`core`] - filtering, row projection, CSV output and the pipeline
//! - [`input`] - reading and decoding log files
//! - [`config`] - [`ExtractConfig`](config::ExtractConfig), [`Verbosity`](config::Verbosity)
//! - [`report`] - [`Diagnostic`](report::Diagnostic) events and [`Reporter`](report::Reporter)s
//! - [`error`] - [`AttachlogError`], [`Result`]
//! - `cli` - clap argument definitions (feature `cli`)

pub mod attachment;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod input;
pub mod record;
pub mod report;

// Re-export the main types at the crate root for convenience
pub use error::{AttachlogError, Result};
pub use record::LogRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use attachlog::prelude::*;
/// ```
pub mod prelude {
    pub use crate::attachment::Attachment;
    pub use crate::config::{ExtractConfig, Verbosity};
    pub use crate::core::filter::{Decision, FilterConfig, RejectReason, TypeRule};
    pub use crate::core::models::{BLANK_GROUP_NAME, OutputRow};
    pub use crate::core::output::CsvSink;
    pub use crate::core::processor::{ProcessingStats, extract_file, run, to_csv};
    pub use crate::error::{AttachlogError, Result};
    pub use crate::extract::{RecordExtractor, extract_records};
    pub use crate::record::{LogRecord, MessageKind, Origin};
    pub use crate::report::{Diagnostic, Reporter, no_report, stderr_reporter};
}
