use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::slide::{self, NewSlide};
use crate::storage::BlobStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideQuery {
    pub presentation_id: Option<String>,
}

/// GET /slides?presentationId=<id>
/// Without `presentationId` every slide is returned.
pub async fn list(pool: web::Data<DbPool>, query: web::Query<SlideQuery>) -> Result<HttpResponse, AppError> {
    let slides = slide::list(&pool, query.presentation_id.as_deref()).await?;
    Ok(HttpResponse::Ok().json(slides))
}

/// POST /slides
/// Inline `data:` payloads in `fileUrl` are uploaded before the slide is stored.
pub async fn create(
    pool: web::Data<DbPool>,
    blobs: web::Data<dyn BlobStore>,
    body: web::Json<NewSlide>,
) -> Result<HttpResponse, AppError> {
    let created = slide::create(&pool, blobs.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(created))
}
