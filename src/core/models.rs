//! Output row model.

use serde::Serialize;

use crate::attachment::Attachment;
use crate::record::{LogRecord, Origin};

/// Written to `group_name` for groups that have no name.
pub const BLANK_GROUP_NAME: &str = "(blank)";

/// CSV columns, in output order.
pub const COLUMNS: [&str; 13] = [
    "msgtype",
    "msgid",
    "group_name",
    "guild_name",
    "channel_name",
    "username",
    "dm_user1",
    "dm_user2",
    "attachment_id",
    "attachment_url",
    "attachment_proxy_url",
    "filename",
    "bytes_size",
];

/// One CSV row: an accepted record joined with its parsed attachment.
///
/// Fields that do not apply to the record's kind are `None` and written as
/// empty cells. Field order matches [`COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow<'a> {
    pub msgtype: char,
    pub msgid: &'a str,
    pub group_name: Option<&'a str>,
    pub guild_name: Option<&'a str>,
    pub channel_name: Option<&'a str>,
    /// Author of a guild or group message.
    pub username: Option<&'a str>,
    pub dm_user1: Option<&'a str>,
    pub dm_user2: Option<&'a str>,
    pub attachment_id: String,
    pub attachment_url: String,
    pub attachment_proxy_url: String,
    pub filename: String,
    pub bytes_size: u64,
}

impl<'a> OutputRow<'a> {
    /// Projects a record and its attachment into a row.
    pub fn project(record: &LogRecord<'a>, attachment: Attachment) -> Self {
        let mut row = OutputRow {
            msgtype: record.kind().tag(),
            msgid: record.msgid,
            group_name: None,
            guild_name: None,
            channel_name: None,
            username: None,
            dm_user1: None,
            dm_user2: None,
            attachment_id: attachment.id,
            attachment_url: attachment.url,
            attachment_proxy_url: attachment.proxy_url,
            filename: attachment.file_name,
            bytes_size: attachment.size,
        };

        match record.origin {
            Origin::Guild {
                guild,
                channel,
                user,
            } => {
                row.guild_name = Some(guild);
                row.channel_name = Some(channel);
                row.username = Some(user);
            }
            Origin::Direct { from, to } => {
                row.dm_user1 = Some(from);
                row.dm_user2 = Some(to);
            }
            Origin::Group { name, user } => {
                row.group_name = Some(if name.is_empty() {
                    BLANK_GROUP_NAME
                } else {
                    name
                });
                row.username = Some(user);
            }
        }

        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment() -> Attachment {
        Attachment {
            id: "1".into(),
            url: "http://x/1".into(),
            proxy_url: "http://y/1".into(),
            file_name: "a.png".into(),
            size: 100,
        }
    }

    fn record(origin: Origin<'_>) -> LogRecord<'_> {
        LogRecord {
            msgid: "42",
            origin,
            attachment_json: "{}",
            span: 0..0,
        }
    }

    #[test]
    fn test_project_guild() {
        let rec = record(Origin::Guild {
            guild: "Rustaceans",
            channel: "general",
            user: "alice",
        });
        let row = OutputRow::project(&rec, attachment());

        assert_eq!(row.msgtype, 'G');
        assert_eq!(row.msgid, "42");
        assert_eq!(row.guild_name, Some("Rustaceans"));
        assert_eq!(row.channel_name, Some("general"));
        assert_eq!(row.username, Some("alice"));
        assert_eq!(row.group_name, None);
        assert_eq!(row.dm_user1, None);
        assert_eq!(row.attachment_url, "http://x/1");
        assert_eq!(row.bytes_size, 100);
    }

    #[test]
    fn test_project_dm() {
        let rec = record(Origin::Direct {
            from: "alice",
            to: "bob",
        });
        let row = OutputRow::project(&rec, attachment());

        assert_eq!(row.msgtype, 'D');
        assert_eq!(row.dm_user1, Some("alice"));
        assert_eq!(row.dm_user2, Some("bob"));
        assert_eq!(row.username, None);
    }

    #[test]
    fn test_project_blank_group_uses_placeholder() {
        let rec = record(Origin::Group {
            name: "",
            user: "carol",
        });
        let row = OutputRow::project(&rec, attachment());

        assert_eq!(row.msgtype, 'g');
        assert_eq!(row.group_name, Some(BLANK_GROUP_NAME));
        assert_eq!(row.username, Some("carol"));
    }

    #[test]
    fn test_project_named_group() {
        let rec = record(Origin::Group {
            name: "squad",
            user: "carol",
        });
        let row = OutputRow::project(&rec, attachment());
        assert_eq!(row.group_name, Some("squad"));
    }
}
