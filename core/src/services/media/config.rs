//! Configuration for the media service

use roost_shared::config::MediaConfig;

/// Configuration for the media service
#[derive(Debug, Clone)]
pub struct MediaServiceConfig {
    /// Blob store folder that listing images are uploaded into
    pub folder: String,
    /// Maximum decoded size of a single image in bytes
    pub max_image_bytes: usize,
}

impl Default for MediaServiceConfig {
    fn default() -> Self {
        Self {
            folder: "listings".to_string(),
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

impl From<&MediaConfig> for MediaServiceConfig {
    fn from(config: &MediaConfig) -> Self {
        Self {
            folder: config.upload_folder.clone(),
            max_image_bytes: config.max_image_bytes,
        }
    }
}
