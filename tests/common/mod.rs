//! Shared test infrastructure.
//!
//! - `setup_test_db()` - in-memory SQLite pool with the schema applied
//! - `data_url()` / `PNG_BYTES` / `WEBP_BYTES` - inline upload payloads

#![allow(dead_code)]

use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use deckhand::db::{self, DbPool};
use deckhand::models::presentation::{self, NewPresentation, Presentation};
use deckhand::models::slide::{self, NewSlide, Slide};
use deckhand::storage::BlobStore;

/// Smallest byte prefix that image sniffing recognises as PNG.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

/// RIFF/WEBP header followed by the start of a lossy `VP8 ` chunk.
pub const WEBP_BYTES: &[u8] = b"RIFF\x1a\0\0\0WEBPVP8 \x0e\0\0\0\x30\x01\0\x9d\x01\x2a\x01\0\x01\0";

/// Owns the test pool. One connection, never recycled, so the in-memory
/// database lives as long as this value.
pub struct TestDb {
    pool: DbPool,
}

impl TestDb {
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

pub async fn setup_test_db() -> TestDb {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Invalid in-memory URL")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    db::run_migrations(&pool).await.expect("Failed to run migrations");
    TestDb { pool }
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

pub async fn create_presentation(pool: &DbPool, title: &str) -> Presentation {
    presentation::create(
        pool,
        NewPresentation {
            title: title.to_string(),
            description: format!("{title} description"),
        },
    )
    .await
    .expect("Failed to create presentation")
}

pub fn new_slide(title: &str, content_type: &str, presentation_id: Option<&str>) -> NewSlide {
    NewSlide {
        title: title.to_string(),
        content_type: Some(content_type.to_string()),
        content: Some(format!("{title} content")),
        file_url: None,
        presentation_id: presentation_id.map(str::to_string),
    }
}

pub async fn create_slide(
    pool: &DbPool,
    blobs: &dyn BlobStore,
    title: &str,
    content_type: &str,
    presentation_id: Option<&str>,
) -> Slide {
    slide::create(pool, blobs, new_slide(title, content_type, presentation_id))
        .await
        .expect("Failed to create slide")
}
