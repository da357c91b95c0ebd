use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::presentation;
use crate::storage::BlobStore;
use crate::templates_structs::{
    ContentTypeOption, PageContext, PresentationFormTemplate, PresentationOption, SelectedPresentation,
    SlideFormTemplate, SlideView, ViewerTemplate,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerQuery {
    pub presentation_id: Option<String>,
}

/// GET /admin
/// Presentation picker, slide carousel and the export link.
pub async fn viewer(
    pool: web::Data<DbPool>,
    blobs: web::Data<dyn BlobStore>,
    query: web::Query<ViewerQuery>,
) -> Result<HttpResponse, AppError> {
    let presentations = presentation::find_all(&pool).await?;
    let selected_id = query.presentation_id.as_deref().filter(|id| !id.is_empty());

    let current = match selected_id {
        Some(id) => presentation::find_by_id(&pool, id).await?,
        None => None,
    };
    let slides = current
        .as_ref()
        .map(|p| p.slides.iter().map(|s| SlideView::new(s, blobs.get_ref())).collect())
        .unwrap_or_default();
    let selected = current.map(|p| SelectedPresentation {
        download_filename: p.download_filename(),
        id: p.id,
        title: p.title,
    });

    let tmpl = ViewerTemplate {
        ctx: PageContext::build("/admin"),
        presentations: PresentationOption::from_presentations(&presentations, selected_id),
        selected,
        slides,
    };
    render(tmpl)
}

/// GET /admin/presentations
pub async fn presentation_form() -> Result<HttpResponse, AppError> {
    render(PresentationFormTemplate {
        ctx: PageContext::build("/admin/presentations"),
    })
}

/// GET /admin/slides
pub async fn slide_form(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let presentations = presentation::find_all(&pool).await?;
    render(SlideFormTemplate {
        ctx: PageContext::build("/admin/slides"),
        presentations: PresentationOption::from_presentations(&presentations, None),
        content_types: ContentTypeOption::all(),
    })
}

/// GET /
pub async fn root_redirect() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", "/admin"))
        .finish()
}

/// Fallback for unknown routes.
pub async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
