//! Presentation export: slides in, `.pptx` bytes out.

use crate::db::DbPool;
use crate::deck::{Deck, ImageFormat, Picture, TextBox, inches};
use crate::errors::AppError;
use crate::models::slide::{self, ContentType, Slide};
use crate::storage::{self, BlobStore};

pub const PPTX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Filename sent with every export, whatever the presentation is called.
pub const EXPORT_FILENAME: &str = "presentation.pptx";

fn title_box(title: &str) -> TextBox {
    TextBox::new(title, inches(0.5), inches(0.5), inches(9.0), inches(0.9))
        .font_size(32.0)
        .bold(true)
        .color("000000")
}

fn body_box(content: &str) -> TextBox {
    TextBox::new(content, inches(0.5), inches(1.5), inches(9.0), inches(3.6))
        .font_size(20.0)
        .color("333333")
}

/// Load the picture behind a slide's `fileUrl`.
///
/// `None` when the stored bytes are not a format the deck can embed.
async fn load_picture(blobs: &dyn BlobStore, file_url: &str) -> Result<Option<Picture>, AppError> {
    if storage::is_external_url(file_url) {
        return Ok(Some(Picture::Linked { url: file_url.to_string() }));
    }
    let data = blobs.get(file_url).await.map_err(AppError::Blob)?;
    Ok(ImageFormat::detect_from_bytes(&data).map(|format| Picture::Embedded { data, format }))
}

/// Map slides onto a deck. Slides the deck cannot show are skipped.
pub async fn build_deck(slides: &[Slide], blobs: &dyn BlobStore) -> Result<Deck, AppError> {
    let mut deck = Deck::new();

    for s in slides {
        match (s.content_type, s.file_url.as_deref()) {
            (ContentType::Text, _) => {
                deck.add_slide().add_text(title_box(&s.title)).add_text(body_box(&s.content));
            }
            (ContentType::Image, Some(url)) if !url.is_empty() => {
                let picture = load_picture(blobs, url).await?;
                let deck_slide = deck.add_slide();
                deck_slide.add_text(title_box(&s.title));
                match picture {
                    Some(picture) => {
                        deck_slide.add_picture(picture, inches(0.5), inches(1.0), inches(8.0), inches(4.0));
                    }
                    None => log::warn!("Slide {} image {url} cannot be embedded, exporting title only", s.id),
                }
            }
            (content_type, _) => {
                log::debug!("Skipping {content_type} slide {} in export", s.id);
            }
        }
    }

    Ok(deck)
}

/// Export a presentation's slides as `.pptx` bytes.
///
/// Without an id the slides that belong to no presentation are exported. An
/// unknown id yields an empty deck.
pub async fn export_presentation(
    pool: &DbPool,
    blobs: &dyn BlobStore,
    presentation_id: Option<&str>,
) -> Result<Vec<u8>, AppError> {
    let slides = match presentation_id {
        Some(id) => slide::find_by_presentation(pool, id).await?,
        None => slide::find_unassigned(pool).await?,
    };

    let deck = build_deck(&slides, blobs).await?;
    let bytes = deck.to_bytes()?;
    log::info!(
        "Exported {} of {} slides ({} bytes) for presentation {}",
        deck.slide_count(),
        slides.len(),
        bytes.len(),
        presentation_id.unwrap_or("<none>")
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::storage::MemoryBlobStore;

    fn slide(content_type: ContentType, file_url: Option<&str>) -> Slide {
        let now = Utc::now();
        Slide {
            id: "s1".into(),
            title: "Title".into(),
            content_type,
            content: "Body".into(),
            file_url: file_url.map(str::to_string),
            presentation_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[actix_rt::test]
    async fn test_text_slide_gets_title_and_body() {
        let blobs = MemoryBlobStore::new();
        let deck = build_deck(&[slide(ContentType::Text, None)], &blobs).await.unwrap();
        assert_eq!(deck.slide_count(), 1);
        assert_eq!(deck.slides()[0].text(), "Title\nBody");
    }

    #[actix_rt::test]
    async fn test_video_bullets_and_bare_image_are_skipped() {
        let blobs = MemoryBlobStore::new();
        let slides = [
            slide(ContentType::Video, Some("https://example.com/v.mp4")),
            slide(ContentType::Bullets, None),
            slide(ContentType::Image, None),
            slide(ContentType::Image, Some("")),
        ];
        let deck = build_deck(&slides, &blobs).await.unwrap();
        assert_eq!(deck.slide_count(), 0);
    }

    #[actix_rt::test]
    async fn test_external_image_is_linked() {
        let blobs = MemoryBlobStore::new();
        let deck = build_deck(&[slide(ContentType::Image, Some("https://example.com/a.png"))], &blobs)
            .await
            .unwrap();
        assert_eq!(deck.slides()[0].shape_count(), 2);
    }

    #[actix_rt::test]
    async fn test_unembeddable_blob_keeps_title_only() {
        let blobs = MemoryBlobStore::new();
        let path = blobs
            .put("slides/a.svg", b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>".to_vec(), "image/svg+xml")
            .await
            .unwrap();
        let deck = build_deck(&[slide(ContentType::Image, Some(&path))], &blobs).await.unwrap();
        assert_eq!(deck.slide_count(), 1);
        assert_eq!(deck.slides()[0].shape_count(), 1);
        assert_eq!(deck.slides()[0].text(), "Title");
    }

    #[actix_rt::test]
    async fn test_missing_blob_fails() {
        let blobs = MemoryBlobStore::new();
        let err = build_deck(&[slide(ContentType::Image, Some("slides/missing.png"))], &blobs)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Blob(_)));
    }
}
