//! Core processing logic for attachlog.
//!
//! This module contains:
//! - [`filter`] - Accept/reject decisions by message kind and target names
//! - [`models`] - The CSV row model
//! - [`output`] - CSV writer
//! - [`processor`] - The extraction pipeline and its statistics
//!
//! # Quick Start
//!
//! ```rust
//! use attachlog::core::{FilterConfig, to_csv};
//! use attachlog::config::ExtractConfig;
//!
//! let config = ExtractConfig::new().with_filter(FilterConfig::new().with_guild("Rustaceans"));
//! let csv = to_csv("", &config).unwrap();
//! assert_eq!(csv.lines().count(), 1); // header only
//! ```

pub mod filter;
pub mod models;
pub mod output;
pub mod processor;

// Re-export main types for convenience
pub use filter::{Decision, FilterConfig, RejectReason};
pub use models::OutputRow;
pub use output::CsvSink;
pub use processor::{ProcessingStats, extract_file, run, to_csv};
