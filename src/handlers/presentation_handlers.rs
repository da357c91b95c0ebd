use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::presentation::{self, NewPresentation};

/// GET /presentations
/// Every presentation with its slides nested.
pub async fn list(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let presentations = presentation::find_all(&pool).await?;
    Ok(HttpResponse::Ok().json(presentations))
}

/// POST /presentations
pub async fn create(pool: web::Data<DbPool>, body: web::Json<NewPresentation>) -> Result<HttpResponse, AppError> {
    let created = presentation::create(&pool, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(created))
}
