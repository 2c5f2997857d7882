//! Reply payloads

use serde::Serialize;

/// An image shown in the corner of an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    /// Source url of the image.
    pub url: String,
    /// Proxied url of the image.
    pub proxy_url: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A named field in an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field title.
    pub name: String,
    /// Field body.
    pub value: String,
}

/// A rich embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    /// The embed type, always `rich`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Title of the embed.
    pub title: String,
    /// Markdown formatted body.
    pub description: String,
    /// Optional thumbnail image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
    /// Additional fields, in display order.
    pub fields: Vec<Field>,
}

impl Embed {
    /// Creates a new rich embed with the given title and description.
    #[must_use]
    pub fn rich(title: impl Into<String>, description: impl Into<String>) -> Embed {
        Embed {
            kind: "rich",
            title: title.into(),
            description: description.into(),
            thumbnail: None,
            fields: vec![],
        }
    }
}

/// The reply to a command invocation.
///
/// Replies are shown to the invoking user only and never sent to the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// A rich embed.
    Embed(Embed),
    /// A plain text notice.
    Notice(String),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn embed_serializes_in_host_shape() {
        let mut embed = Embed::rich("Guild", "body");
        embed.thumbnail = Some(Thumbnail {
            url: "u".to_string(),
            proxy_url: "u".to_string(),
            width: 128,
            height: 128,
        });
        embed.fields.push(Field {
            name: "n".to_string(),
            value: "v".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&embed).unwrap(),
            json!({
                "type": "rich",
                "title": "Guild",
                "description": "body",
                "thumbnail": { "url": "u", "proxy_url": "u", "width": 128, "height": 128 },
                "fields": [{ "name": "n", "value": "v" }],
            })
        );
    }

    #[test]
    fn embed_omits_missing_thumbnail() {
        let value = serde_json::to_value(Embed::rich("Guild", "body")).unwrap();

        assert!(value.get("thumbnail").is_none());
    }
}
