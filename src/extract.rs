//! Record extraction from DiscordMonitor verbose logs.
//!
//! The monitor prints one block per observed message:
//!
//! ```text
//! 325012345678901234:(Rustaceans)[general]<alice>:
//! Time: 2017-06-20 12:00:00
//! Message: look at this
//! Attachment[0]: {
//!   "id": "325012345678901235",
//!   "url": "https://cdn.example/a.png",
//!   "proxyUrl": "https://media.example/a.png",
//!   "fileName": "a.png",
//!   "size": 1024
//! }
//! ```
//!
//! A single pattern recognizes the three header shapes, the preview line,
//! the `Message:` body and the `Attachment[0]: ` marker. The JSON object
//! that follows is delimited by brace balancing, so pretty-printed and
//! single-line objects are both accepted. Blocks without an attachment never
//! match and are skipped silently.
//!
//! # Example
//!
//! ```
//! use attachlog::extract::RecordExtractor;
//! use attachlog::record::MessageKind;
//!
//! let log = "1:[DM]<alice -> bob>: \nTime: now\nMessage: hi\nAttachment[0]: {\"id\":\"2\"}\n";
//! let extractor = RecordExtractor::new();
//! let records: Vec<_> = extractor.records(log).collect::<Result<_, _>>().unwrap();
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].kind(), MessageKind::DirectMessage);
//! assert_eq!(records[0].attachment_json, "{\"id\":\"2\"}");
//! ```

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::record::{LogRecord, Origin};

/// Pattern matching a record from its header up to the opening brace of
/// `Attachment[0]`.
///
/// Body lines may not start with `<digits>:` because that is how every
/// header starts; such a line ends the body scan.
pub const RECORD_PATTERN: &str = concat!(
    r"(?:",
    r"(?P<msgid>\d+):\((?P<guildname>.+)\)\[(?P<channelname>.+)\]<(?P<username>.+)>: ?",
    r"|(?P<dm_msgid>\d+):\[DM\]<(?P<dm_user1>.*) -> (?P<dm_user2>.*)>: ?",
    r"|(?P<group_msgid>\d+):\[GRP: (?P<group_name>.*?)\]<(?P<group_username>.+)>: ?",
    r")\r?\n",
    r".*\r?\n",
    r"Message:(?:(?:[^\d\n].*|\d+(?:[^\d:\n].*)?)?\r?\n)+",
    r"Attachment\[0\]: \{",
);

static DEFAULT_EXTRACTOR: LazyLock<RecordExtractor> = LazyLock::new(RecordExtractor::new);

/// A matched block whose message kind could not be determined.
///
/// The pattern's alternatives make this unreachable for any input; it is
/// kept as a checked condition so a pattern change cannot silently produce
/// records without an origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnclassifiedRecord {
    /// Byte offset of the block in the log text.
    pub offset: usize,
    /// 1-based line number of the block.
    pub line: usize,
}

/// Compiled record matcher.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    regex: Regex,
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor {
    /// Compiles the record pattern.
    pub fn new() -> Self {
        Self {
            regex: Regex::new(RECORD_PATTERN).expect("record pattern is a valid regex"),
        }
    }

    /// Returns a lazy iterator over the records of `text`, in document order.
    pub fn records<'r, 't>(&'r self, text: &'t str) -> Records<'r, 't> {
        Records {
            regex: &self.regex,
            text,
            pos: 0,
        }
    }
}

/// Extracts records from `text` with a shared, lazily compiled extractor.
pub fn extract_records(text: &str) -> Records<'static, '_> {
    DEFAULT_EXTRACTOR.records(text)
}

/// Iterator returned by [`RecordExtractor::records`].
#[derive(Debug)]
pub struct Records<'r, 't> {
    regex: &'r Regex,
    text: &'t str,
    pos: usize,
}

impl<'t> Iterator for Records<'_, 't> {
    type Item = Result<LogRecord<'t>, UnclassifiedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }

        let Some(caps) = self.regex.captures_at(self.text, self.pos) else {
            self.pos = self.text.len();
            return None;
        };
        let whole = caps.get(0)?;

        // The match ends on the opening brace of the attachment object.
        let json_start = whole.end() - 1;
        let json_end = json_object_end(self.text, json_start).unwrap_or(self.text.len());
        self.pos = json_end;

        Some(classify(
            &caps,
            &self.text[json_start..json_end],
            whole.start()..json_end,
            self.text,
        ))
    }
}

/// Builds a [`LogRecord`] from whichever header alternative matched.
fn classify<'t>(
    caps: &Captures<'t>,
    attachment_json: &'t str,
    span: Range<usize>,
    text: &str,
) -> Result<LogRecord<'t>, UnclassifiedRecord> {
    let field = |name: &str| caps.name(name).map_or("", |m| m.as_str());

    let (msgid, origin) = if let Some(id) = caps.name("dm_msgid") {
        (
            id.as_str(),
            Origin::Direct {
                from: field("dm_user1"),
                to: field("dm_user2"),
            },
        )
    } else if let Some(id) = caps.name("group_msgid") {
        (
            id.as_str(),
            Origin::Group {
                name: field("group_name"),
                user: field("group_username"),
            },
        )
    } else if let Some(id) = caps.name("msgid") {
        (
            id.as_str(),
            Origin::Guild {
                guild: field("guildname"),
                channel: field("channelname"),
                user: field("username"),
            },
        )
    } else {
        return Err(UnclassifiedRecord {
            offset: span.start,
            line: line_of(text, span.start),
        });
    };

    Ok(LogRecord {
        msgid,
        origin,
        attachment_json,
        span,
    })
}

/// Returns the end offset (exclusive) of the JSON object opening at `start`.
///
/// Braces inside string literals are ignored. Returns `None` when the object
/// never closes.
fn json_object_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    // Only ASCII bytes are inspected, which never occur inside a multi-byte
    // UTF-8 sequence, so the returned offset is a char boundary.
    for (i, &b) in text.as_bytes()[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

fn line_of(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
