//! Main session service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::value_objects::identity::{Session, SignIn, UserIdentity, VerifiedProfile};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;

use super::config::SessionServiceConfig;
use super::tokens::SessionClaims;

/// Service for resolving sessions and establishing new ones
///
/// Holds the signing keys for session tokens. Resolution is read-only;
/// the only write path is the lazy user provisioning inside
/// [`establish`](SessionService::establish).
pub struct SessionService<U: UserRepository> {
    user_repository: Arc<U>,
    config: SessionServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<U: UserRepository> SessionService<U> {
    /// Create a new session service
    pub fn new(user_repository: Arc<U>, config: SessionServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            user_repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Resolve a request session to the identity it belongs to
    ///
    /// Fails with `Unauthenticated` when no session is present or when
    /// the session's email no longer maps to a stored user. Performs no
    /// writes.
    pub async fn resolve(&self, session: Option<&Session>) -> DomainResult<UserIdentity> {
        let session = session.ok_or(DomainError::Unauthenticated)?;

        match self.user_repository.find_by_email(&session.email).await? {
            Some(user) => Ok(UserIdentity::from_user(&user)),
            None => {
                // A signed token for a user that no longer exists
                tracing::warn!(user_id = %session.user_id, "session resolved to a missing user");
                Err(DomainError::Unauthenticated)
            }
        }
    }

    /// Establish a session for a verified profile, provisioning the
    /// user on first sign-in
    ///
    /// The username is taken from the profile name (truncated by the
    /// entity), the avatar from the profile picture. A repeat sign-in
    /// with the same email reuses the stored user unchanged.
    pub async fn establish(&self, profile: VerifiedProfile) -> DomainResult<SignIn> {
        let user = match self.user_repository.find_by_email(&profile.email).await? {
            Some(existing) => existing,
            None => {
                let user = User::new(profile.email.clone(), profile.name.clone(), profile.picture);
                let created = self.user_repository.create(user).await?;
                tracing::info!(user_id = %created.id, "provisioned user on first sign-in");
                created
            }
        };

        let token = self.issue_token(&user)?;
        Ok(SignIn {
            token,
            expires_in: self.config.token_ttl_seconds(),
            user,
        })
    }

    /// Issue a signed session token for a user
    pub fn issue_token(&self, user: &User) -> DomainResult<String> {
        let claims = SessionClaims::new(
            user,
            self.config.token_ttl_minutes,
            &self.config.issuer,
            &self.config.audience,
        );
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|_| {
            DomainError::Internal {
                message: "Failed to sign session token".to_string(),
            }
        })
    }

    /// Verify a bearer token and extract the session it carries
    ///
    /// All verification failures collapse to `Unauthenticated`; the
    /// specific reason is only worth a debug log.
    pub fn verify_token(&self, token: &str) -> DomainResult<Session> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(reason = %e, "session token rejected");
                DomainError::Unauthenticated
            })?;

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|_| DomainError::Unauthenticated)?;

        Ok(Session {
            user_id,
            email: token_data.claims.email,
        })
    }

    /// Token lifetime in seconds, as advertised to clients
    pub fn token_ttl_seconds(&self) -> i64 {
        self.config.token_ttl_seconds()
    }
}
