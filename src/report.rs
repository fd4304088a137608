//! Diagnostic reporting for extraction runs.
//!
//! Processing never prints directly. Every noteworthy event (a message id
//! being processed, a rejection, a skipped record, the final summary) is
//! delivered as a [`Diagnostic`] to an injected [`Reporter`] callback. The
//! CLI installs [`stderr_reporter`]; tests install [`collecting_reporter`]
//! and assert on what was reported.
//!
//! # Example
//!
//! ```rust
//! use attachlog::config::Verbosity;
//! use attachlog::report::{Diagnostic, DiagnosticKind, Reporter};
//! use std::sync::Arc;
//!
//! let reporter: Reporter = Arc::new(|diag: &Diagnostic<'_>| {
//!     if diag.kind() == DiagnosticKind::UnknownMessageType {
//!         eprintln!("{}", diag);
//!     }
//! });
//!
//! reporter(&Diagnostic::Processing { msgid: "1" });
//! assert_eq!(Diagnostic::Processing { msgid: "1" }.level(), Verbosity::PROGRESS);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::config::{ExtractConfig, Verbosity};
use crate::core::filter::RejectReason;
use crate::core::models::OutputRow;
use crate::core::processor::ProcessingStats;
use crate::record::LogRecord;

/// An event emitted while processing a log.
#[derive(Debug, Clone, Copy)]
pub enum Diagnostic<'a> {
    /// Effective configuration, before any record is read.
    Config(&'a ExtractConfig),
    /// A record is about to be evaluated.
    Processing { msgid: &'a str },
    /// The raw record as matched.
    Record(&'a LogRecord<'a>),
    /// The record was rejected by a filter stage.
    Rejected {
        msgid: &'a str,
        reason: RejectReason,
    },
    /// The record passed every filter stage and its row was written.
    Accepted { msgid: &'a str },
    /// The row written for an accepted record.
    Written(&'a OutputRow<'a>),
    /// A matched block had no recognizable message kind and was skipped.
    UnknownMessageType { offset: usize, line: usize },
    /// Counters at the end of the run.
    Summary(&'a ProcessingStats),
}

/// Discriminant of a [`Diagnostic`], convenient for matching in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Config,
    Processing,
    Record,
    Rejected,
    Accepted,
    Written,
    UnknownMessageType,
    Summary,
}

impl Diagnostic<'_> {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::Config(_) => DiagnosticKind::Config,
            Diagnostic::Processing { .. } => DiagnosticKind::Processing,
            Diagnostic::Record(_) => DiagnosticKind::Record,
            Diagnostic::Rejected { .. } => DiagnosticKind::Rejected,
            Diagnostic::Accepted { .. } => DiagnosticKind::Accepted,
            Diagnostic::Written(_) => DiagnosticKind::Written,
            Diagnostic::UnknownMessageType { .. } => DiagnosticKind::UnknownMessageType,
            Diagnostic::Summary(_) => DiagnosticKind::Summary,
        }
    }

    /// Returns the lowest verbosity at which this event is shown.
    ///
    /// Warnings are shown even when silent.
    pub fn level(&self) -> Verbosity {
        match self {
            Diagnostic::UnknownMessageType { .. } => Verbosity::SILENT,
            Diagnostic::Processing { .. }
            | Diagnostic::Accepted { .. }
            | Diagnostic::Summary(_) => Verbosity::PROGRESS,
            Diagnostic::Config(_)
            | Diagnostic::Record(_)
            | Diagnostic::Rejected { .. }
            | Diagnostic::Written(_) => Verbosity::DEBUG,
        }
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Config(config) => write!(f, "config: {:?}", config),
            Diagnostic::Processing { msgid } => write!(f, "Processing msgid:{}", msgid),
            Diagnostic::Record(record) => write!(f, "  match: {:?}", record),
            Diagnostic::Rejected { reason, .. } => write!(f, "  reject: {}", reason),
            Diagnostic::Accepted { .. } => write!(f, "  written to file"),
            Diagnostic::Written(row) => write!(f, "  written: {:?}", row),
            Diagnostic::UnknownMessageType { offset, line } => write!(
                f,
                "warning: encountered unknown message type at line {} (byte {}). Message skipped.",
                line, offset
            ),
            Diagnostic::Summary(stats) => {
                writeln!(f, "Summary:")?;
                writeln!(f, "   Matched:   {} records", stats.matched)?;
                writeln!(f, "   Written:   {} rows", stats.written)?;
                writeln!(f, "   Not included: {}", stats.not_included)?;
                writeln!(f, "   Excluded:  {}", stats.excluded)?;
                writeln!(f, "   Non-target: {}", stats.non_target)?;
                write!(f, "   Skipped:   {} (unknown type)", stats.unclassified)
            }
        }
    }
}

/// Callback receiving [`Diagnostic`] events.
pub type Reporter = Arc<dyn Fn(&Diagnostic<'_>) + Send + Sync>;

/// Creates a reporter that drops every event.
pub fn no_report() -> Reporter {
    Arc::new(|_: &Diagnostic<'_>| {})
}

/// Creates a reporter that prints events up to `verbosity` to stderr.
///
/// Stderr keeps standard output free for CSV written to `-`.
pub fn stderr_reporter(verbosity: Verbosity) -> Reporter {
    Arc::new(move |diag: &Diagnostic<'_>| {
        if diag.level() <= verbosity {
            eprintln!("{}", diag);
        }
    })
}

/// Events captured by [`collecting_reporter`]: kind plus rendered text.
pub type Collected = Arc<Mutex<Vec<(DiagnosticKind, String)>>>;

/// Creates a reporter that records every event, regardless of level.
pub fn collecting_reporter() -> (Reporter, Collected) {
    let events: Collected = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);

    let reporter: Reporter = Arc::new(move |diag: &Diagnostic<'_>| {
        if let Ok(mut events) = sink.lock() {
            events.push((diag.kind(), diag.to_string()));
        }
    });

    (reporter, events)
}
