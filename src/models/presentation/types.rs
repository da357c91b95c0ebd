use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::slide::Slide;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub slides: Vec<Slide>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Presentation {
    /// Client-side download name: spaces become underscores.
    pub fn download_filename(&self) -> String {
        format!("{}.pptx", self.title.replace(' ', "_"))
    }
}

/// Body of `POST /presentations`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPresentation {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct PresentationRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PresentationRow {
    pub(crate) fn with_slides(self, slides: Vec<Slide>) -> Presentation {
        Presentation {
            id: self.id,
            title: self.title,
            description: self.description,
            slides,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_filename_replaces_spaces() {
        let now = Utc::now();
        let p = Presentation {
            id: "p".into(),
            title: "Quarterly  review 2024".into(),
            description: String::new(),
            slides: vec![],
            created_at: now,
            updated_at: now,
        };
        assert_eq!(p.download_filename(), "Quarterly__review_2024.pptx");
    }

    #[test]
    fn test_new_presentation_description_defaults_empty() {
        let new: NewPresentation = serde_json::from_str(r#"{"title":"Deck"}"#).unwrap();
        assert_eq!(new.title, "Deck");
        assert_eq!(new.description, "");
    }
}
