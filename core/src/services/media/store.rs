//! Media store port

use async_trait::async_trait;
use std::sync::Mutex;

use crate::errors::DomainError;

/// A blob successfully stored by the media store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Publicly servable HTTPS URL of the stored blob
    pub secure_url: String,
}

/// Port for an external media blob store
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload a data URI into the given folder
    async fn upload(&self, data_uri: &str, folder: &str) -> Result<StoredMedia, DomainError>;

    /// Destroy a blob by its public id
    ///
    /// Destroying an id that does not exist is not an error; blob
    /// stores treat destroy as idempotent and so do we.
    async fn destroy(&self, public_id: &str) -> Result<(), DomainError>;
}

/// Mock media store for testing
///
/// Records every call; `fail_from` makes uploads fail starting at the
/// given call index (0-based), `fail_destroys` makes destroys fail.
pub struct MockMediaStore {
    uploads: Mutex<Vec<(String, String)>>,
    destroys: Mutex<Vec<String>>,
    fail_from: Mutex<Option<usize>>,
    fail_destroys: Mutex<bool>,
}

impl MockMediaStore {
    /// Create a new mock store where every call succeeds
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            destroys: Mutex::new(Vec::new()),
            fail_from: Mutex::new(None),
            fail_destroys: Mutex::new(false),
        }
    }

    /// Fail every upload starting at call index `index`
    pub fn fail_uploads_from(&self, index: usize) {
        *self.fail_from.lock().unwrap() = Some(index);
    }

    /// Make every destroy call fail
    pub fn fail_destroys(&self) {
        *self.fail_destroys.lock().unwrap() = true;
    }

    /// Data URIs and folders passed to `upload`, in call order
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.uploads.lock().unwrap().clone()
    }

    /// Public ids passed to `destroy`, in call order
    pub fn destroys(&self) -> Vec<String> {
        self.destroys.lock().unwrap().clone()
    }

    /// Number of upload calls seen so far
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

impl Default for MockMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(&self, data_uri: &str, folder: &str) -> Result<StoredMedia, DomainError> {
        let mut uploads = self.uploads.lock().unwrap();
        let index = uploads.len();
        uploads.push((data_uri.to_string(), folder.to_string()));

        if let Some(fail_from) = *self.fail_from.lock().unwrap() {
            if index >= fail_from {
                return Err(DomainError::UploadFailed {
                    message: "Mock media store failure".to_string(),
                });
            }
        }

        Ok(StoredMedia {
            secure_url: format!("https://media.test/{}/image-{}.png", folder, index),
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), DomainError> {
        self.destroys.lock().unwrap().push(public_id.to_string());
        if *self.fail_destroys.lock().unwrap() {
            return Err(DomainError::UploadFailed {
                message: "Mock destroy failure".to_string(),
            });
        }
        Ok(())
    }
}
