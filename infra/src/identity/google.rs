//! Google ID token verification
//!
//! Implements the domain's `IdentityProvider` port against Google's
//! tokeninfo endpoint. The endpoint validates the token's signature and
//! expiry; this adapter additionally checks the audience and that the
//! email is verified before trusting the profile.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use roost_core::domain::value_objects::identity::VerifiedProfile;
use roost_core::errors::DomainError;
use roost_core::services::session::IdentityProvider;
use roost_shared::config::auth::AuthConfig;

use crate::InfrastructureError;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Claims returned by the tokeninfo endpoint
///
/// Google serializes booleans in this response as strings.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    aud: String,
    email: String,
    email_verified: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

/// Google implementation of the identity provider port
pub struct GoogleIdentityProvider {
    client: reqwest::Client,
    client_id: String,
}

impl GoogleIdentityProvider {
    /// Create a new Google identity provider
    pub fn new(config: &AuthConfig) -> Result<Self, InfrastructureError> {
        if config.google_client_id.is_empty() {
            return Err(InfrastructureError::Config(
                "GOOGLE_CLIENT_ID not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            client_id: config.google_client_id.clone(),
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    async fn verify(&self, id_token: &str) -> Result<VerifiedProfile, DomainError> {
        let response = self
            .client
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Identity provider unreachable: {}", e),
            })?;

        if !response.status().is_success() {
            // tokeninfo rejects expired and malformed tokens with 4xx
            debug!(
                "Google rejected id token with status {}",
                response.status()
            );
            return Err(DomainError::Unauthenticated);
        }

        let claims: TokenClaims = response.json().await.map_err(|e| DomainError::Internal {
            message: format!("Invalid tokeninfo response: {}", e),
        })?;

        profile_from_claims(claims, &self.client_id)
    }
}

/// Validate claims and reduce them to a verified profile
fn profile_from_claims(claims: TokenClaims, client_id: &str) -> Result<VerifiedProfile, DomainError> {
    if claims.aud != client_id {
        warn!("Rejected id token issued for a different audience");
        return Err(DomainError::Unauthenticated);
    }

    if claims.email_verified.as_deref() != Some("true") {
        warn!("Rejected id token with unverified email");
        return Err(DomainError::Unauthenticated);
    }

    let name = claims
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| local_part(&claims.email).to_string());

    Ok(VerifiedProfile {
        email: claims.email,
        name,
        picture: claims.picture,
    })
}

/// Everything before the `@` of an email address
fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
