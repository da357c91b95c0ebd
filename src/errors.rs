use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use serde::Serialize;
use std::fmt;

use crate::deck::DeckError;
use crate::storage::BlobError;

#[derive(Debug)]
pub enum AppError {
    InvalidInput(String),
    Upload(BlobError),
    Store(sqlx::Error),
    Blob(BlobError),
    Deck(DeckError),
    Template(askama::Error),
}

/// Uniform error body returned by every endpoint.
#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

impl AppError {
    /// Message shown to the client.
    pub fn message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Upload(_) => "Failed to upload file".to_string(),
            AppError::Store(e) => e.to_string(),
            AppError::Blob(e) => e.to_string(),
            AppError::Deck(e) => e.to_string(),
            AppError::Template(_) => "Failed to render page".to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            AppError::Upload(e) => write!(f, "Upload error: {e}"),
            AppError::Store(e) => write!(f, "Database error: {e}"),
            AppError::Blob(e) => write!(f, "Blob store error: {e}"),
            AppError::Deck(e) => write!(f, "Deck error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::warn!("{self}");
        }
        HttpResponse::build(status).json(ErrorBody {
            status: "error",
            message: self.message(),
        })
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Store(e)
    }
}

impl From<DeckError> for AppError {
    fn from(e: DeckError) -> Self {
        AppError::Deck(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render an askama template into an HTML response.
pub fn render<T: Template>(tmpl: T) -> Result<HttpResponse, AppError> {
    let html = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
