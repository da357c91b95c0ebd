use chrono::Utc;
use uuid::Uuid;

use super::types::*;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::storage::{self, BlobStore, InlinePayload, SLIDES_FOLDER};

const SELECT_SLIDES: &str = "SELECT id, title, content_type, content, file_url, presentation_id, \
                                    created_at, updated_at \
                             FROM slides";

fn into_slides(rows: Vec<SlideRow>) -> Result<Vec<Slide>, AppError> {
    rows.into_iter()
        .map(|row| Slide::try_from(row).map_err(AppError::from))
        .collect()
}

/// Every slide, in insertion order.
pub async fn find_all(pool: &DbPool) -> Result<Vec<Slide>, AppError> {
    let rows = sqlx::query_as::<_, SlideRow>(&format!("{SELECT_SLIDES} ORDER BY rowid"))
        .fetch_all(pool)
        .await?;
    into_slides(rows)
}

/// Slides of one presentation, in insertion order.
pub async fn find_by_presentation(pool: &DbPool, presentation_id: &str) -> Result<Vec<Slide>, AppError> {
    let rows = sqlx::query_as::<_, SlideRow>(&format!(
        "{SELECT_SLIDES} WHERE presentation_id = ?1 ORDER BY rowid"
    ))
    .bind(presentation_id)
    .fetch_all(pool)
    .await?;
    into_slides(rows)
}

/// Slides not attached to any presentation.
pub async fn find_unassigned(pool: &DbPool) -> Result<Vec<Slide>, AppError> {
    let rows = sqlx::query_as::<_, SlideRow>(&format!(
        "{SELECT_SLIDES} WHERE presentation_id IS NULL ORDER BY rowid"
    ))
    .fetch_all(pool)
    .await?;
    into_slides(rows)
}

/// Slides filtered by presentation; `None` or an empty id lists them all.
pub async fn list(pool: &DbPool, presentation_id: Option<&str>) -> Result<Vec<Slide>, AppError> {
    match presentation_id.filter(|id| !id.is_empty()) {
        Some(id) => find_by_presentation(pool, id).await,
        None => find_all(pool).await,
    }
}

/// Resolve the submitted `fileUrl` to what gets persisted.
///
/// External URLs are kept verbatim. Anything else is an inline data URL whose
/// payload is decoded and uploaded; the stored path is returned.
async fn resolve_file_url(blobs: &dyn BlobStore, file_url: Option<String>) -> Result<Option<String>, AppError> {
    let Some(value) = file_url.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if storage::is_external_url(&value) {
        return Ok(Some(value));
    }

    let payload = InlinePayload::decode(&value)
        .ok_or_else(|| AppError::InvalidInput("Invalid file URL".to_string()))?;
    let path = storage::upload(blobs, SLIDES_FOLDER, payload.bytes, payload.mime.as_deref())
        .await
        .map_err(|e| {
            log::error!("Slide upload failed: {e}");
            AppError::Upload(e)
        })?;
    Ok(Some(path))
}

/// Validate, upload any inline payload, then insert the slide.
///
/// Nothing is written when validation or the upload fails. A store failure
/// after a successful upload leaves the blob behind.
pub async fn create(pool: &DbPool, blobs: &dyn BlobStore, new: NewSlide) -> Result<Slide, AppError> {
    let content_type = new
        .content_type
        .as_deref()
        .and_then(ContentType::parse)
        .ok_or_else(|| AppError::InvalidInput("Invalid content type".to_string()))?;

    let file_url = resolve_file_url(blobs, new.file_url).await?;
    let presentation_id = new.presentation_id.filter(|id| !id.is_empty());

    let now = Utc::now();
    let slide = Slide {
        id: Uuid::new_v4().to_string(),
        title: new.title,
        content_type,
        content: new.content.unwrap_or_default(),
        file_url,
        presentation_id,
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        "INSERT INTO slides \
             (id, title, content_type, content, file_url, presentation_id, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(&slide.id)
    .bind(&slide.title)
    .bind(slide.content_type.as_str())
    .bind(&slide.content)
    .bind(&slide.file_url)
    .bind(&slide.presentation_id)
    .bind(slide.created_at)
    .bind(slide.updated_at)
    .execute(pool)
    .await?;

    log::info!("Created {} slide {} ({:?})", slide.content_type, slide.id, slide.title);
    Ok(slide)
}
