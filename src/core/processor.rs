//! The extraction pipeline: records → filter → rows → CSV.

use std::io::Write;
use std::path::Path;

use crate::attachment::Attachment;
use crate::config::ExtractConfig;
use crate::core::filter::{Decision, FilterConfig, RejectReason};
use crate::core::models::OutputRow;
use crate::core::output::{CsvSink, create_output};
use crate::error::Result;
use crate::extract::{UnclassifiedRecord, extract_records};
use crate::input::read_log;
use crate::record::LogRecord;
use crate::report::{Diagnostic, Reporter, no_report};

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Records with a recognized message kind.
    pub matched: usize,
    /// Rows written to the CSV.
    pub written: usize,
    pub not_included: usize,
    pub excluded: usize,
    pub non_target: usize,
    /// Blocks skipped because their message kind was unknown.
    pub unclassified: usize,
}

impl ProcessingStats {
    /// Total records rejected by any filter stage.
    pub fn rejected(&self) -> usize {
        self.not_included + self.excluded + self.non_target
    }

    fn count_rejection(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::NotIncluded => self.not_included += 1,
            RejectReason::Excluded => self.excluded += 1,
            RejectReason::NonTarget => self.non_target += 1,
        }
    }
}

/// Filters `records` and writes accepted ones to `sink`, in order.
///
/// Unclassified records are reported and skipped. An accepted record whose
/// attachment blob cannot be parsed stops processing with an error; rows
/// written before it stay in `sink`.
pub fn process_records<'t, I, W>(
    records: I,
    filter: &FilterConfig,
    sink: &mut CsvSink<W>,
    reporter: &Reporter,
) -> Result<ProcessingStats>
where
    I: IntoIterator<Item = std::result::Result<LogRecord<'t>, UnclassifiedRecord>>,
    W: Write,
{
    let mut stats = ProcessingStats::default();

    for item in records {
        let record = match item {
            Ok(record) => record,
            Err(UnclassifiedRecord { offset, line }) => {
                stats.unclassified += 1;
                reporter(&Diagnostic::UnknownMessageType { offset, line });
                continue;
            }
        };
        stats.matched += 1;

        reporter(&Diagnostic::Processing {
            msgid: record.msgid,
        });
        reporter(&Diagnostic::Record(&record));

        if let Decision::Reject(reason) = filter.evaluate(&record) {
            stats.count_rejection(reason);
            reporter(&Diagnostic::Rejected {
                msgid: record.msgid,
                reason,
            });
            continue;
        }

        let attachment = Attachment::parse(record.msgid, record.attachment_json)?;
        let row = OutputRow::project(&record, attachment);
        sink.write_row(&row)?;
        stats.written += 1;
        reporter(&Diagnostic::Accepted {
            msgid: record.msgid,
        });
        reporter(&Diagnostic::Written(&row));
    }

    Ok(stats)
}

/// Runs the pipeline over in-memory log text.
///
/// The sink is flushed whether or not processing succeeds.
pub fn run<W: Write>(
    text: &str,
    config: &ExtractConfig,
    sink: &mut CsvSink<W>,
    reporter: &Reporter,
) -> Result<ProcessingStats> {
    reporter(&Diagnostic::Config(config));

    let outcome = process_records(extract_records(text), &config.filter, sink, reporter);
    let flushed = sink.flush();
    let stats = outcome?;
    flushed?;

    reporter(&Diagnostic::Summary(&stats));
    Ok(stats)
}

/// Extracts `input` into the CSV at `output` (`-` for stdout).
///
/// When the configuration excludes every message kind, returns immediately
/// without reading the input or creating the output.
pub fn extract_file(
    input: impl AsRef<Path>,
    output: &str,
    config: &ExtractConfig,
    reporter: &Reporter,
) -> Result<ProcessingStats> {
    if config.is_noop() {
        return Ok(ProcessingStats::default());
    }

    let text = read_log(input, config.encoding.as_deref())?;
    let mut sink = CsvSink::new(create_output(output)?)?;
    run(&text, config, &mut sink, reporter)
}

/// Converts log text to a CSV string.
///
/// # Example
///
/// ```
/// use attachlog::config::ExtractConfig;
/// use attachlog::core::processor::to_csv;
///
/// let log = "1:(Guild)[general]<alice>: \nTime: t\nMessage: hi\nAttachment[0]: {\"id\":\"9\",\"url\":\"http://x/9\",\"proxyUrl\":\"http://y/9\",\"fileName\":\"a.png\",\"size\":5}\n";
/// let csv = to_csv(log, &ExtractConfig::new())?;
///
/// assert!(csv.contains("G,1,,Guild,general,alice,,,9,http://x/9,http://y/9,a.png,5"));
/// # Ok::<(), attachlog::AttachlogError>(())
/// ```
pub fn to_csv(text: &str, config: &ExtractConfig) -> Result<String> {
    let mut sink = CsvSink::new(Vec::new())?;
    run(text, config, &mut sink, &no_report())?;
    let bytes = sink.into_inner()?;
    // Every field came from a &str, so the bytes are UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{MessageKind, Origin};
    use crate::report::{DiagnosticKind, collecting_reporter};

    const JSON: &str = r#"{"id":"1","url":"http://x/1","proxyUrl":"http://y/1","fileName":"a.png","size":100}"#;

    fn block(header: &str) -> String {
        format!("{header} \nTime: t\nMessage: hi\nAttachment[0]: {JSON}\n\n")
    }

    fn sample_log() -> String {
        [
            block("1:(Rustaceans)[general]<alice>:"),
            block("2:[DM]<bob -> carol>:"),
            block("3:[GRP: ]<dave>:"),
        ]
        .concat()
    }

    fn data_lines(csv: &str) -> Vec<&str> {
        csv.lines().skip(1).collect()
    }

    #[test]
    fn test_no_filters_accepts_all() {
        let csv = to_csv(&sample_log(), &ExtractConfig::new()).unwrap();
        let lines = data_lines(&csv);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("G,1,,Rustaceans,general,alice,,,"));
        assert!(lines[1].starts_with("D,2,,,,,bob,carol,"));
        assert!(lines[2].starts_with("g,3,(blank),,,dave,,,"));
    }

    #[test]
    fn test_filter_applied() {
        let config = ExtractConfig::new().with_filter(
            FilterConfig::new()
                .exclude(MessageKind::Guild)
                .with_user("carol"),
        );
        let csv = to_csv(&sample_log(), &config).unwrap();
        let lines = data_lines(&csv);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("D,2,"));
    }

    #[test]
    fn test_stats_and_diagnostics() {
        let (reporter, events) = collecting_reporter();
        let config = ExtractConfig::new().with_filter(
            FilterConfig::new()
                .include(MessageKind::DirectMessage)
                .include(MessageKind::Group)
                .with_group(""),
        );

        let mut sink = CsvSink::new(Vec::new()).unwrap();
        let stats = run(&sample_log(), &config, &mut sink, &reporter).unwrap();

        assert_eq!(stats.matched, 3);
        assert_eq!(stats.written, 1);
        assert_eq!(stats.not_included, 1);
        assert_eq!(stats.non_target, 1);
        assert_eq!(stats.rejected(), 2);

        let events = events.lock().unwrap();
        assert_eq!(events.first().map(|e| e.0), Some(DiagnosticKind::Config));
        assert_eq!(events.last().map(|e| e.0), Some(DiagnosticKind::Summary));
        assert_eq!(
            events
                .iter()
                .filter(|e| e.0 == DiagnosticKind::Rejected)
                .count(),
            2
        );
        let accepted: Vec<_> = events
            .iter()
            .filter(|e| e.0 == DiagnosticKind::Accepted)
            .collect();
        assert_eq!(accepted.len(), stats.written);
        assert_eq!(accepted[0].1, "  written to file");
    }

    #[test]
    fn test_unclassified_is_reported_and_skipped() {
        let (reporter, events) = collecting_reporter();
        let good = LogRecord {
            msgid: "5",
            origin: Origin::Direct {
                from: "a",
                to: "b",
            },
            attachment_json: JSON,
            span: 0..0,
        };
        let records = vec![Err(UnclassifiedRecord { offset: 0, line: 1 }), Ok(good)];

        let mut sink = CsvSink::new(Vec::new()).unwrap();
        let stats =
            process_records(records, &FilterConfig::new(), &mut sink, &reporter).unwrap();

        assert_eq!(stats.unclassified, 1);
        assert_eq!(stats.written, 1);
        let events = events.lock().unwrap();
        assert_eq!(events[0].0, DiagnosticKind::UnknownMessageType);
    }

    #[test]
    fn test_malformed_json_is_fatal_after_earlier_rows() {
        let log = format!(
            "{}2:[DM]<a -> b>: \nTime: t\nMessage: hi\nAttachment[0]: {{\"id\":\"1\"}}\n",
            block("1:(G)[c]<u>:")
        );

        let mut sink = CsvSink::new(Vec::new()).unwrap();
        let err = run(&log, &ExtractConfig::new(), &mut sink, &no_report()).unwrap_err();
        assert!(err.is_attachment_error());
        assert!(err.to_string().contains("message 2"));

        // The first row was written before the failure.
        assert_eq!(sink.rows_written(), 1);
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(data_lines(&out).len(), 1);
    }

    #[test]
    fn test_malformed_json_ignored_when_rejected() {
        let log = "2:[DM]<a -> b>: \nTime: t\nMessage: hi\nAttachment[0]: {\"id\":\"1\"}\n";
        let config =
            ExtractConfig::new().with_filter(FilterConfig::new().exclude(MessageKind::DirectMessage));

        let csv = to_csv(log, &config).unwrap();
        assert!(data_lines(&csv).is_empty());
    }

    #[test]
    fn test_noop_config_touches_nothing() {
        let config = ExtractConfig::new().with_filter(
            FilterConfig::new()
                .exclude(MessageKind::Guild)
                .exclude(MessageKind::DirectMessage)
                .exclude(MessageKind::Group),
        );
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let stats = extract_file(
            dir.path().join("missing.log"),
            output.to_str().unwrap(),
            &config,
            &no_report(),
        )
        .unwrap();

        assert_eq!(stats, ProcessingStats::default());
        assert!(!output.exists());
    }

    #[test]
    fn test_idempotent() {
        let config = ExtractConfig::new();
        let first = to_csv(&sample_log(), &config).unwrap();
        let second = to_csv(&sample_log(), &config).unwrap();
        assert_eq!(first, second);
    }
}
