//! Media storage configuration module

use serde::{Deserialize, Serialize};

/// Cloudinary media storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Cloudinary cloud name
    pub cloud_name: String,

    /// Cloudinary API key
    pub api_key: String,

    /// Cloudinary API secret, used to sign upload and destroy requests
    pub api_secret: String,

    /// Folder that listing images are uploaded into
    #[serde(default = "default_upload_folder")]
    pub upload_folder: String,

    /// Maximum decoded size of a single image in bytes
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            upload_folder: default_upload_folder(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl MediaConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME").unwrap_or_default(),
            api_key: std::env::var("CLOUDINARY_API_KEY").unwrap_or_default(),
            api_secret: std::env::var("CLOUDINARY_API_SECRET").unwrap_or_default(),
            upload_folder: std::env::var("CLOUDINARY_UPLOAD_FOLDER")
                .unwrap_or_else(|_| default_upload_folder()),
            max_image_bytes: std::env::var("MEDIA_MAX_IMAGE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_image_bytes),
        }
    }

    /// Check whether credentials are present
    ///
    /// The concrete store validates on construction; this only reports
    /// whether anything was configured at all.
    pub fn is_configured(&self) -> bool {
        !self.cloud_name.is_empty() && !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

fn default_upload_folder() -> String {
    String::from("listings")
}

fn default_max_image_bytes() -> usize {
    10 * 1024 * 1024  // 10 MB
}
