//! Records recognized in a DiscordMonitor log.
//!
//! A monitor log interleaves three kinds of message headers. Each matched
//! record is represented as a [`LogRecord`] whose [`Origin`] carries only the
//! fields that exist for that kind of message:
//!
//! | Kind | Header | Origin fields |
//! |------|--------|---------------|
//! | Guild | `<id>:(<guild>)[<channel>]<<user>>:` | guild, channel, user |
//! | Direct message | `<id>:[DM]<<from> -> <to>>:` | from, to |
//! | Group | `<id>:[GRP: <name>]<<user>>:` | name, user |
//!
//! # Example
//!
//! ```
//! use attachlog::record::{MessageKind, Origin};
//!
//! let origin = Origin::Group { name: "", user: "alice" };
//! assert_eq!(origin.kind(), MessageKind::Group);
//! assert_eq!(origin.kind().tag(), 'g');
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// The three kinds of messages a monitor log contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Message posted to a channel of a guild (server).
    Guild,
    /// Private two-party message.
    #[serde(rename = "dm")]
    DirectMessage,
    /// Message in an ad hoc group outside any guild.
    Group,
}

impl MessageKind {
    /// Returns the single-character tag written to the `msgtype` column.
    ///
    /// Guild and group differ only by case (`G` vs `g`); downstream
    /// consumers rely on these exact values.
    pub fn tag(self) -> char {
        match self {
            MessageKind::Guild => 'G',
            MessageKind::DirectMessage => 'D',
            MessageKind::Group => 'g',
        }
    }

    /// Returns all kinds in a stable order.
    pub fn all() -> &'static [MessageKind] {
        &[
            MessageKind::Guild,
            MessageKind::DirectMessage,
            MessageKind::Group,
        ]
    }
}

/// Where a message came from.
///
/// All fields borrow from the log text the record was matched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin<'t> {
    /// Guild channel message.
    Guild {
        guild: &'t str,
        channel: &'t str,
        user: &'t str,
    },
    /// Direct message between two users.
    Direct { from: &'t str, to: &'t str },
    /// Group message. `name` is empty for unnamed groups.
    Group { name: &'t str, user: &'t str },
}

impl<'t> Origin<'t> {
    /// Returns the message kind of this origin.
    pub fn kind(&self) -> MessageKind {
        match self {
            Origin::Guild { .. } => MessageKind::Guild,
            Origin::Direct { .. } => MessageKind::DirectMessage,
            Origin::Group { .. } => MessageKind::Group,
        }
    }

    /// Returns every user name attached to this origin.
    ///
    /// One author for guild and group messages, both participants for DMs.
    pub fn users(&self) -> impl Iterator<Item = &'t str> {
        let (first, second) = match *self {
            Origin::Guild { user, .. } | Origin::Group { user, .. } => (user, None),
            Origin::Direct { from, to } => (from, Some(to)),
        };
        std::iter::once(first).chain(second)
    }
}

/// A single attachment-bearing record matched in a monitor log.
///
/// Exists only while the record is evaluated; nothing in the pipeline keeps
/// records past their own iteration step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord<'t> {
    /// Message id (a snowflake), kept as the digits that appear in the log.
    pub msgid: &'t str,

    /// Origin of the message.
    pub origin: Origin<'t>,

    /// The `Attachment[0]` JSON object, verbatim from the log.
    pub attachment_json: &'t str,

    /// Byte range of the whole record in the log text.
    pub span: Range<usize>,
}

impl LogRecord<'_> {
    /// Returns the message kind of this record.
    pub fn kind(&self) -> MessageKind {
        self.origin.kind()
    }
}
