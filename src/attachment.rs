//! Attachment metadata parsed from `Attachment[0]` blobs.
//!
//! The monitor serializes attachments with GSON, so the blob carries every
//! field of the attachment object. Only the five fields needed for
//! downloading are read; anything else (`width`, `height`, ...) is ignored.

use serde::{Deserialize, Deserializer};

use crate::error::{AttachlogError, Result};

/// Attachment metadata from a single log record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Attachment id. GSON writes it as a string or a number depending on
    /// the library version; both are kept as text.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Direct CDN URL.
    pub url: String,

    /// Media proxy URL.
    pub proxy_url: String,

    /// Original file name.
    pub file_name: String,

    /// Size in bytes.
    pub size: u64,
}

impl Attachment {
    /// Parses an attachment blob belonging to message `msgid`.
    ///
    /// # Errors
    ///
    /// Returns [`AttachlogError::Attachment`] if the blob is not valid JSON or
    /// is missing one of the expected keys.
    ///
    /// # Example
    ///
    /// ```
    /// use attachlog::attachment::Attachment;
    ///
    /// let json = r#"{"id":"1","url":"http://x/1","proxyUrl":"http://y/1","fileName":"a.png","size":100}"#;
    /// let attachment = Attachment::parse("42", json)?;
    /// assert_eq!(attachment.file_name, "a.png");
    /// assert_eq!(attachment.size, 100);
    /// # Ok::<(), attachlog::AttachlogError>(())
    /// ```
    pub fn parse(msgid: &str, json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AttachlogError::attachment(msgid, e))
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pretty_printed() {
        let json = "{\n  \"id\": \"325012345678901235\",\n  \"url\": \"https://cdn.example/a.png\",\n  \"proxyUrl\": \"https://media.example/a.png\",\n  \"fileName\": \"a.png\",\n  \"size\": 1024,\n  \"height\": 64,\n  \"width\": 64\n}";
        let attachment = Attachment::parse("1", json).unwrap();

        assert_eq!(attachment.id, "325012345678901235");
        assert_eq!(attachment.url, "https://cdn.example/a.png");
        assert_eq!(attachment.proxy_url, "https://media.example/a.png");
        assert_eq!(attachment.file_name, "a.png");
        assert_eq!(attachment.size, 1024);
    }

    #[test]
    fn test_numeric_id() {
        let json = r#"{"id":325012345678901235,"url":"u","proxyUrl":"p","fileName":"f","size":0}"#;
        let attachment = Attachment::parse("1", json).unwrap();
        assert_eq!(attachment.id, "325012345678901235");
    }

    #[test]
    fn test_missing_key_is_error() {
        let json = r#"{"id":"1","url":"u","fileName":"f","size":1}"#;
        let err = Attachment::parse("77", json).unwrap_err();

        assert!(err.is_attachment_error());
        assert!(err.to_string().contains("77"));
        assert!(err.to_string().contains("proxyUrl"));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = Attachment::parse("5", "{\n  \"id\": \"1\"\n").unwrap_err();
        assert!(err.is_attachment_error());
    }

    #[test]
    fn test_negative_size_is_error() {
        let json = r#"{"id":"1","url":"u","proxyUrl":"p","fileName":"f","size":-3}"#;
        assert!(Attachment::parse("1", json).is_err());
    }
}
