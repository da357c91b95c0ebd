use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::types::*;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::slide::{self, Slide};

const SELECT_PRESENTATIONS: &str = "SELECT id, title, description, created_at, updated_at FROM presentations";

/// Every presentation with its slides, both in insertion order.
pub async fn find_all(pool: &DbPool) -> Result<Vec<Presentation>, AppError> {
    let rows = sqlx::query_as::<_, PresentationRow>(&format!("{SELECT_PRESENTATIONS} ORDER BY rowid"))
        .fetch_all(pool)
        .await?;

    // One pass over all slides instead of a query per presentation.
    let mut by_presentation: HashMap<String, Vec<Slide>> = HashMap::new();
    for s in slide::find_all(pool).await? {
        if let Some(pid) = s.presentation_id.clone() {
            by_presentation.entry(pid).or_default().push(s);
        }
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let slides = by_presentation.remove(&row.id).unwrap_or_default();
            row.with_slides(slides)
        })
        .collect())
}

pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Presentation>, AppError> {
    let row = sqlx::query_as::<_, PresentationRow>(&format!("{SELECT_PRESENTATIONS} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let slides = slide::find_by_presentation(pool, &row.id).await?;
            Ok(Some(row.with_slides(slides)))
        }
        None => Ok(None),
    }
}

/// Insert a presentation. It starts with no slides.
pub async fn create(pool: &DbPool, new: NewPresentation) -> Result<Presentation, AppError> {
    let now = Utc::now();
    let presentation = Presentation {
        id: Uuid::new_v4().to_string(),
        title: new.title,
        description: new.description,
        slides: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        "INSERT INTO presentations (id, title, description, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&presentation.id)
    .bind(&presentation.title)
    .bind(&presentation.description)
    .bind(presentation.created_at)
    .bind(presentation.updated_at)
    .execute(pool)
    .await?;

    log::info!("Created presentation {} ({:?})", presentation.id, presentation.title);
    Ok(presentation)
}
