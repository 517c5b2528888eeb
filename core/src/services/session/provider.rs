//! Identity provider port
//!
//! The OAuth browser dance happens entirely outside this service; all
//! that crosses the boundary is an id token, which the provider turns
//! into a verified profile or rejects.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::value_objects::identity::VerifiedProfile;
use crate::errors::DomainError;

/// Port for verifying identity provider tokens
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify an id token and return the profile it attests
    ///
    /// # Returns
    /// * `Ok(VerifiedProfile)` - The token is genuine and unexpired
    /// * `Err(DomainError::Unauthenticated)` - The token failed verification
    async fn verify(&self, id_token: &str) -> Result<VerifiedProfile, DomainError>;
}

/// Mock identity provider for testing
///
/// Accepts a single configured token and returns the configured
/// profile for it; everything else is rejected.
pub struct MockIdentityProvider {
    accepted_token: String,
    profile: VerifiedProfile,
    calls: Mutex<Vec<String>>,
}

impl MockIdentityProvider {
    /// Create a provider accepting `token` and attesting `profile`
    pub fn new(token: impl Into<String>, profile: VerifiedProfile) -> Self {
        Self {
            accepted_token: token.into(),
            profile,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Tokens this provider was asked to verify
    pub fn verified_tokens(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn verify(&self, id_token: &str) -> Result<VerifiedProfile, DomainError> {
        self.calls.lock().unwrap().push(id_token.to_string());
        if id_token == self.accepted_token {
            Ok(self.profile.clone())
        } else {
            Err(DomainError::Unauthenticated)
        }
    }
}
