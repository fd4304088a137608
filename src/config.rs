//! Configuration types for extraction runs.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. The `attachlog` binary builds an
//! [`ExtractConfig`] from its command-line arguments.
//!
//! # Example
//!
//! ```rust
//! use attachlog::config::{ExtractConfig, Verbosity};
//! use attachlog::core::filter::FilterConfig;
//! use attachlog::record::MessageKind;
//!
//! let config = ExtractConfig::new()
//!     .with_encoding("windows-1252")
//!     .with_verbosity(Verbosity::PROGRESS)
//!     .with_filter(FilterConfig::new().exclude(MessageKind::Guild));
//!
//! assert_eq!(config.encoding.as_deref(), Some("windows-1252"));
//! ```

use serde::{Deserialize, Serialize};

use crate::core::filter::FilterConfig;

/// How much progress and debug output a run produces.
///
/// | Level | Output |
/// |-------|--------|
/// | 0 | warnings only |
/// | 1 | each message id, a line for each row written, and a final summary |
/// | 2 | also the configuration, raw records, rejection reasons and written rows |
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Verbosity(pub u8);

impl Verbosity {
    pub const SILENT: Verbosity = Verbosity(0);
    pub const PROGRESS: Verbosity = Verbosity(1);
    pub const DEBUG: Verbosity = Verbosity(2);

    /// Converts a repeated-flag count (`-v`, `-vv`, ...) into a level.
    ///
    /// Counts above 2 behave like 2.
    pub fn from_count(count: u8) -> Self {
        Verbosity(count.min(Self::DEBUG.0))
    }
}

/// Settings for one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Input encoding label (WHATWG, e.g. `windows-1252`).
    ///
    /// `None` reads the log as UTF-8, replacing invalid sequences.
    pub encoding: Option<String>,

    /// Progress and debug output level (default: silent).
    pub verbosity: Verbosity,

    /// Record filter (default: accept everything).
    pub filter: FilterConfig,
}

impl ExtractConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input encoding label.
    #[must_use]
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// Sets the verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Sets the record filter.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Returns `true` if the run cannot produce any row.
    pub fn is_noop(&self) -> bool {
        self.filter.excludes_everything()
    }
}
