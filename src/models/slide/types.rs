use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a slide carries. Stored and serialized as the upper-case tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentType {
    Text,
    Image,
    Video,
    Bullets,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Text,
        ContentType::Image,
        ContentType::Video,
        ContentType::Bullets,
    ];

    /// Parse a tag exactly as stored (`TEXT`, `IMAGE`, `VIDEO`, `BULLETS`).
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ct| ct.as_str() == tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "TEXT",
            ContentType::Image => "IMAGE",
            ContentType::Video => "VIDEO",
            ContentType::Bullets => "BULLETS",
        }
    }

    /// Human label used by the admin forms.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Text => "Text",
            ContentType::Image => "Image",
            ContentType::Video => "Video",
            ContentType::Bullets => "Bullets",
        }
    }

    /// IMAGE and VIDEO slides take a file instead of text.
    pub fn takes_file(&self) -> bool {
        matches!(self, ContentType::Image | ContentType::Video)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: String,
    pub title: String,
    pub content_type: ContentType,
    pub content: String,
    pub file_url: Option<String>,
    pub presentation_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Slide {
    /// Items of a BULLETS slide, one per non-blank line.
    pub fn bullet_items(&self) -> Vec<&str> {
        self.content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

/// Body of `POST /slides`.
///
/// `content_type` stays a string here so that an unknown tag reaches the
/// repository and is reported as "Invalid content type" rather than as a
/// JSON shape error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSlide {
    pub title: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub presentation_id: Option<String>,
}

/// Raw `slides` row.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SlideRow {
    pub id: String,
    pub title: String,
    pub content_type: String,
    pub content: String,
    pub file_url: Option<String>,
    pub presentation_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SlideRow> for Slide {
    type Error = sqlx::Error;

    fn try_from(row: SlideRow) -> Result<Self, Self::Error> {
        let content_type = ContentType::parse(&row.content_type).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown content type {:?}", row.content_type).into())
        })?;
        Ok(Slide {
            id: row.id,
            title: row.title,
            content_type,
            content: row.content,
            file_url: row.file_url,
            presentation_id: row.presentation_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
