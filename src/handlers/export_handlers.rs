use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::export::{self, EXPORT_FILENAME, PPTX_CONTENT_TYPE};
use crate::storage::BlobStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub presentation_id: Option<String>,
}

/// GET /ppt?presentationId=<id>
/// Streams the generated deck back as an attachment.
pub async fn download(
    pool: web::Data<DbPool>,
    blobs: web::Data<dyn BlobStore>,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse, AppError> {
    let presentation_id = query.presentation_id.as_deref().filter(|id| !id.is_empty());
    let bytes = export::export_presentation(&pool, blobs.get_ref(), presentation_id).await?;

    Ok(HttpResponse::Ok()
        .content_type(PPTX_CONTENT_TYPE)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(EXPORT_FILENAME.to_string())],
        })
        .body(bytes))
}
