//! Cloudinary Media Store Implementation
//!
//! Implements the domain's `MediaStore` port against the Cloudinary
//! upload API. Requests are signed with SHA-256 over the sorted
//! parameters plus the API secret, per Cloudinary's signed-upload
//! scheme. Credentials never appear in logs.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{debug, error, info};

use roost_core::errors::DomainError;
use roost_core::services::media::{MediaStore, StoredMedia};
use roost_shared::config::media::MediaConfig;

use crate::InfrastructureError;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Successful upload response, reduced to the field we store
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Destroy response; `result` is "ok" or "not found"
#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Error payload Cloudinary returns on failed requests
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Cloudinary implementation of the media store port
pub struct CloudinaryStore {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryStore {
    /// Create a new Cloudinary store from media configuration
    ///
    /// Fails fast when credentials are missing so a misconfigured
    /// deployment dies at startup instead of on the first upload.
    pub fn new(config: &MediaConfig) -> Result<Self, InfrastructureError> {
        if !config.is_configured() {
            return Err(InfrastructureError::Config(
                "Cloudinary credentials not configured (CLOUDINARY_CLOUD_NAME, \
                 CLOUDINARY_API_KEY, CLOUDINARY_API_SECRET)"
                    .to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        info!(
            "Cloudinary store initialized for cloud '{}' with API key {}",
            config.cloud_name,
            mask_key(&config.api_key)
        );

        Ok(Self {
            client,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{}", API_BASE, self.cloud_name, action)
    }
}

#[async_trait]
impl MediaStore for CloudinaryStore {
    async fn upload(&self, data_uri: &str, folder: &str) -> Result<StoredMedia, DomainError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_request(
            &[("folder", folder), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        debug!("Uploading image to Cloudinary folder '{}'", folder);

        let form = [
            ("file", data_uri),
            ("api_key", self.api_key.as_str()),
            ("timestamp", timestamp.as_str()),
            ("folder", folder),
            ("signature", signature.as_str()),
            ("signature_algorithm", "sha256"),
        ];

        let response = self
            .client
            .post(self.endpoint("upload"))
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!("Cloudinary upload request failed: {}", e);
                DomainError::UploadFailed {
                    message: format!("Cloudinary request failed: {}", e),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = error_detail(response).await;
            error!("Cloudinary upload rejected with status {}: {}", status, detail);
            return Err(DomainError::UploadFailed {
                message: format!("Cloudinary upload failed ({}): {}", status, detail),
            });
        }

        let uploaded: UploadResponse = response.json().await.map_err(|e| {
            error!("Cloudinary upload response was not decodable: {}", e);
            DomainError::UploadFailed {
                message: format!("Invalid Cloudinary response: {}", e),
            }
        })?;

        debug!("Uploaded image to {}", uploaded.secure_url);

        Ok(StoredMedia {
            secure_url: uploaded.secure_url,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), DomainError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_request(
            &[("public_id", public_id), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        debug!("Destroying Cloudinary asset '{}'", public_id);

        let form = [
            ("public_id", public_id),
            ("api_key", self.api_key.as_str()),
            ("timestamp", timestamp.as_str()),
            ("signature", signature.as_str()),
            ("signature_algorithm", "sha256"),
        ];

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&form)
            .send()
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Cloudinary request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = error_detail(response).await;
            return Err(DomainError::Internal {
                message: format!("Cloudinary destroy failed ({}): {}", status, detail),
            });
        }

        let destroyed: DestroyResponse = response.json().await.map_err(|e| {
            DomainError::Internal {
                message: format!("Invalid Cloudinary response: {}", e),
            }
        })?;

        // "not found" counts as destroyed; the port is idempotent
        match destroyed.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(DomainError::Internal {
                message: format!("Cloudinary destroy returned '{}'", other),
            }),
        }
    }
}

/// Sign request parameters the way Cloudinary expects
///
/// Parameters are sorted by name, joined as `key=value` pairs with `&`,
/// suffixed with the API secret, and hashed with SHA-256.
fn sign_request(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<(&str, &str)> = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Extract the error message from a failed response, best effort
async fn error_detail(response: reqwest::Response) -> String {
    match response.json::<ErrorResponse>().await {
        Ok(body) => body.error.message,
        Err(_) => "no error detail".to_string(),
    }
}

/// Mask an API key for logging, keeping a recognizable prefix
fn mask_key(key: &str) -> String {
    if key.len() <= 4 {
        return "****".to_string();
    }
    format!("{}****", &key[..4])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_request_matches_known_vector() {
        let signature = sign_request(
            &[("folder", "listings"), ("timestamp", "1700000000")],
            "shhh",
        );
        assert_eq!(
            signature,
            "73c78a2851e1632eaa1a8cde0cc075f265480815eb1bf59baef00041bf03d02d"
        );
    }

    #[test]
    fn test_sign_request_is_order_independent() {
        let forward = sign_request(
            &[("folder", "listings"), ("timestamp", "1700000000")],
            "shhh",
        );
        let reversed = sign_request(
            &[("timestamp", "1700000000"), ("folder", "listings")],
            "shhh",
        );
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_sign_request_destroy_vector() {
        let signature = sign_request(
            &[("public_id", "listings/abc123"), ("timestamp", "1700000000")],
            "shhh",
        );
        assert_eq!(
            signature,
            "9f6fec25298f6c015d8073c1d292bb888bd5d7ecc145d521f2781153d42af06d"
        );
    }

    #[test]
    fn test_mask_key_hides_everything_but_prefix() {
        assert_eq!(mask_key("123456789012"), "1234****");
        assert_eq!(mask_key("abc"), "****");
    }

    #[test]
    fn test_store_requires_credentials() {
        let config = MediaConfig::default();
        let result = CloudinaryStore::new(&config);
        assert!(result.is_err());
    }
}
