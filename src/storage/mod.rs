//! Blob storage for uploaded slide media.
//!
//! Blobs are addressed by a relative path such as `slides/3f9a....png`. The
//! path is what gets persisted on the slide; [`BlobStore::url`] turns it into
//! something a browser can fetch.

pub mod inline;
pub mod local;
pub mod memory;

use async_trait::async_trait;
use std::fmt;

pub use inline::InlinePayload;
pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;

/// Folder that slide uploads are written under.
pub const SLIDES_FOLDER: &str = "slides";

#[derive(Debug)]
pub enum BlobError {
    Io(std::io::Error),
    NotFound(String),
    InvalidKey(String),
    Backend(String),
}

impl fmt::Display for BlobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobError::Io(e) => write!(f, "I/O error: {e}"),
            BlobError::NotFound(key) => write!(f, "Blob not found: {key}"),
            BlobError::InvalidKey(key) => write!(f, "Invalid blob key: {key}"),
            BlobError::Backend(msg) => write!(f, "Blob backend error: {msg}"),
        }
    }
}

impl std::error::Error for BlobError {}

impl From<std::io::Error> for BlobError {
    fn from(e: std::io::Error) -> Self {
        BlobError::Io(e)
    }
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key` and return the durable path to persist.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String, BlobError>;

    /// Read a previously stored blob back.
    async fn get(&self, path: &str) -> Result<Vec<u8>, BlobError>;

    /// Resolve a stored path to a download URL.
    fn url(&self, path: &str) -> String;
}

/// Absolute external URLs are stored as-is and never go through the store.
pub fn is_external_url(value: &str) -> bool {
    value.starts_with("http")
}

/// Upload bytes into `folder` under a freshly generated name.
///
/// The extension is derived from the MIME type when one is known.
pub async fn upload(
    store: &dyn BlobStore,
    folder: &str,
    data: Vec<u8>,
    mime: Option<&str>,
) -> Result<String, BlobError> {
    let content_type = mime.unwrap_or("application/octet-stream");
    let key = format!(
        "{}/{}.{}",
        folder.trim_end_matches('/'),
        generate_name(),
        extension_for(mime)
    );
    let path = store.put(&key, data, content_type).await?;
    log::info!("Uploaded blob {path} ({content_type})");
    Ok(path)
}

fn generate_name() -> String {
    hex::encode(rand::random::<[u8; 12]>())
}

/// File extension for a MIME type; `bin` when unknown.
pub fn extension_for(mime: Option<&str>) -> &'static str {
    let Some(mime) = mime else { return "bin" };
    match mime {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/ogg" => "ogv",
        "video/quicktime" => "mov",
        "text/plain" => "txt",
        _ => "bin",
    }
}

/// Reject keys that could escape the store root.
pub(crate) fn validate_key(key: &str) -> Result<(), BlobError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|part| part.is_empty() || part == "." || part == "..");
    if bad {
        return Err(BlobError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_url_detection() {
        assert!(is_external_url("https://example.com/a.png"));
        assert!(is_external_url("http://example.com/a.png"));
        assert!(!is_external_url("slides/abc.png"));
        assert!(!is_external_url("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_extension_for_common_types() {
        assert_eq!(extension_for(Some("image/png")), "png");
        assert_eq!(extension_for(Some("image/jpeg")), "jpg");
        assert_eq!(extension_for(Some("video/mp4")), "mp4");
        assert_eq!(extension_for(None), "bin");
        assert_eq!(extension_for(Some("application/x-not-a-real-type")), "bin");
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("slides/abc.png").is_ok());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("/abs/path").is_err());
        assert!(validate_key("slides//x").is_err());
        assert!(validate_key("").is_err());
    }

    #[tokio::test]
    async fn test_upload_generates_unique_keys_under_folder() {
        let store = MemoryBlobStore::new();
        let a = upload(&store, "slides/", vec![1], Some("image/png")).await.unwrap();
        let b = upload(&store, "slides", vec![2], Some("image/png")).await.unwrap();

        assert!(a.starts_with("slides/") && a.ends_with(".png"));
        assert!(b.starts_with("slides/") && b.ends_with(".png"));
        assert_ne!(a, b);
        assert_eq!(store.get(&a).await.unwrap(), vec![1]);
    }
}
