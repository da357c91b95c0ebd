use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{BlobError, BlobStore, is_external_url, validate_key};

/// Filesystem-backed blob store. Blobs live under `root` and are served
/// over HTTP from `public_path`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_path: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_path: &str) -> Self {
        Self {
            root: root.into(),
            public_path: public_path.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<String, BlobError> {
        validate_key(key)?;
        let target = self.root.join(key);
        if let Some(dir) = target.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&target, data).await?;
        Ok(key.to_string())
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>, BlobError> {
        validate_key(path)?;
        match tokio::fs::read(self.root.join(path)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(BlobError::NotFound(path.to_string())),
            Err(e) => Err(BlobError::Io(e)),
        }
    }

    fn url(&self, path: &str) -> String {
        if is_external_url(path) {
            return path.to_string();
        }
        format!("{}/{}", self.public_path, path.trim_start_matches('/'))
    }
}
