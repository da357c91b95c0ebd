use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{BlobError, BlobStore, is_external_url, validate_key};

/// In-process blob store. `failing()` builds one that rejects every write,
/// for exercising upload error paths.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    reject_writes: bool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
            reject_writes: true,
        }
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<String, BlobError> {
        if self.reject_writes {
            return Err(BlobError::Backend("writes disabled".to_string()));
        }
        validate_key(key)?;
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| BlobError::Backend("lock poisoned".to_string()))?;
        blobs.insert(key.to_string(), data);
        Ok(key.to_string())
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>, BlobError> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| BlobError::Backend("lock poisoned".to_string()))?;
        blobs
            .get(path)
            .cloned()
            .ok_or_else(|| BlobError::NotFound(path.to_string()))
    }

    fn url(&self, path: &str) -> String {
        if is_external_url(path) {
            return path.to_string();
        }
        format!("/blobs/{path}")
    }
}
