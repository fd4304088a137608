//! CSV output writer.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::core::models::{COLUMNS, OutputRow};
use crate::error::{AttachlogError, Result};

/// Output path that selects standard output.
pub const STDOUT_PATH: &str = "-";

/// Incremental CSV writer for [`OutputRow`]s.
///
/// # Format
/// - Delimiter: `,`
/// - Header: [`COLUMNS`], always written, even when no row follows
/// - Quoting: only where needed
/// - Line terminator: CRLF
/// - Encoding: UTF-8
///
/// Rows are written as they are accepted; nothing is buffered beyond the
/// underlying writer's buffer, so rows already written survive a later
/// fatal error.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> CsvSink<W> {
    /// Wraps `inner` and writes the header row.
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(inner);
        writer.write_record(COLUMNS)?;

        Ok(Self { writer, rows: 0 })
    }

    /// Appends one row.
    pub fn write_row(&mut self, row: &OutputRow<'_>) -> Result<()> {
        self.writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    /// Returns the number of rows written so far (header excluded).
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flushes buffered rows to the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| AttachlogError::from(e.into_error()))
    }
}

/// Opens the CSV destination: a new file, or standard output for `-`.
pub fn create_output(path: &str) -> Result<Box<dyn Write>> {
    if path == STDOUT_PATH {
        return Ok(Box::new(io::stdout().lock()));
    }

    let file = File::create(Path::new(path)).map_err(|e| AttachlogError::io(e, path))?;
    Ok(Box::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::Attachment;
    use crate::record::{LogRecord, Origin};
    use std::io::Read;
    use tempfile::NamedTempFile;

    const HEADER: &str = "msgtype,msgid,group_name,guild_name,channel_name,username,dm_user1,dm_user2,attachment_id,attachment_url,attachment_proxy_url,filename,bytes_size\r\n";

    fn attachment(file_name: &str) -> Attachment {
        Attachment {
            id: "1".into(),
            url: "http://x/1".into(),
            proxy_url: "http://y/1".into(),
            file_name: file_name.into(),
            size: 100,
        }
    }

    #[test]
    fn test_header_only() {
        let sink = CsvSink::new(Vec::new()).unwrap();
        let bytes = sink.into_inner().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), HEADER);
    }

    #[test]
    fn test_write_guild_row() {
        let record = LogRecord {
            msgid: "42",
            origin: Origin::Guild {
                guild: "Rustaceans",
                channel: "general",
                user: "alice",
            },
            attachment_json: "{}",
            span: 0..0,
        };

        let mut sink = CsvSink::new(Vec::new()).unwrap();
        sink.write_row(&OutputRow::project(&record, attachment("a.png")))
            .unwrap();
        assert_eq!(sink.rows_written(), 1);

        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            format!("{HEADER}G,42,,Rustaceans,general,alice,,,1,http://x/1,http://y/1,a.png,100\r\n")
        );
    }

    #[test]
    fn test_quotes_special_characters() {
        let record = LogRecord {
            msgid: "7",
            origin: Origin::Direct {
                from: "a,b",
                to: "say \"hi\"",
            },
            attachment_json: "{}",
            span: 0..0,
        };

        let mut sink = CsvSink::new(Vec::new()).unwrap();
        sink.write_row(&OutputRow::project(&record, attachment("x.png")))
            .unwrap();

        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert!(out.contains("D,7,,,,,\"a,b\",\"say \"\"hi\"\"\",1,"));
    }

    #[test]
    fn test_create_output_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        {
            let out = create_output(path).unwrap();
            let mut sink = CsvSink::new(out).unwrap();
            sink.flush().unwrap();
        }

        let mut content = String::new();
        std::fs::File::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, HEADER);
    }

    #[test]
    fn test_create_output_bad_path() {
        let Err(err) = create_output("/nonexistent-dir/for/sure/out.csv") else {
            panic!("expected an error");
        };
        assert!(err.is_io_error());
        assert!(err.to_string().contains("out.csv"));
    }
}
