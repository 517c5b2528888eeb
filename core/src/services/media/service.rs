//! Main media service implementation

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;

use crate::errors::{DomainError, DomainResult};

use super::config::MediaServiceConfig;
use super::store::MediaStore;

/// An image file as received from a listing submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Original file name, used only for error reporting
    pub file_name: String,

    /// Raw image bytes
    pub bytes: Vec<u8>,
}

/// Service that moves listing images in and out of the blob store
pub struct MediaService<M: MediaStore> {
    store: Arc<M>,
    config: MediaServiceConfig,
}

impl<M: MediaStore> MediaService<M> {
    /// Create a new media service
    pub fn new(store: Arc<M>, config: MediaServiceConfig) -> Self {
        Self { store, config }
    }

    /// Upload a batch of images and return their URLs in input order
    ///
    /// Sizes are validated up front so an oversized file fails the
    /// batch before any bytes leave the process. Uploads then run
    /// sequentially; the first failure aborts the batch with
    /// `UploadFailed`. Blobs uploaded before the failure are left in
    /// the store - there is no rollback, the orphans are only logged.
    pub async fn ingest(&self, files: &[ImageFile]) -> DomainResult<Vec<String>> {
        for file in files {
            if file.bytes.len() > self.config.max_image_bytes {
                return Err(DomainError::Validation {
                    message: format!(
                        "Image '{}' exceeds the maximum size of {} bytes",
                        file.file_name, self.config.max_image_bytes
                    ),
                });
            }
        }

        let mut urls = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            let data_uri = format!("data:image/png;base64,{}", STANDARD.encode(&file.bytes));
            match self.store.upload(&data_uri, &self.config.folder).await {
                Ok(stored) => urls.push(stored.secure_url),
                Err(e) => {
                    tracing::error!(
                        file = %file.file_name,
                        uploaded = index,
                        error = %e,
                        "image upload failed, aborting batch; earlier uploads are orphaned"
                    );
                    return Err(DomainError::UploadFailed {
                        message: format!("Upload of '{}' failed: {}", file.file_name, e),
                    });
                }
            }
        }

        Ok(urls)
    }

    /// Best-effort removal of previously ingested images
    ///
    /// Failures are logged and skipped; a listing deletion must never
    /// be blocked by the blob store.
    pub async fn remove(&self, urls: &[String]) {
        for url in urls {
            let Some(public_id) = self.public_id_for(url) else {
                tracing::warn!(%url, "could not derive a public id, skipping");
                continue;
            };
            if let Err(e) = self.store.destroy(&public_id).await {
                tracing::warn!(%public_id, error = %e, "blob destroy failed, continuing");
            }
        }
    }

    /// Derive the blob store public id for an ingested image URL
    ///
    /// The id is the configured folder plus the last URL path segment
    /// with its extension stripped. URLs whose final segment is empty
    /// yield `None`.
    pub fn public_id_for(&self, url: &str) -> Option<String> {
        let last_segment = url.rsplit('/').next().unwrap_or_default();
        let stem = last_segment.split('.').next().unwrap_or_default();
        if stem.is_empty() {
            return None;
        }
        Some(format!("{}/{}", self.config.folder, stem))
    }
}
