//! Identity value objects flowing between the session layer and services.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::User;

/// Request-scoped session extracted from a verified bearer token
///
/// Constructed by the HTTP layer once per request and handed down to
/// services; nothing below the HTTP layer reads ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// User id from the token's `sub` claim
    pub user_id: Uuid,

    /// Email from the token's `email` claim
    pub email: String,
}

/// The identity a session resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
}

impl UserIdentity {
    /// Builds an identity from a stored user
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
        }
    }
}

/// Profile attested by an external identity provider
///
/// This is what a verified Google id token boils down to; the OAuth
/// dance itself happens outside this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedProfile {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

/// Successful sign-in outcome containing the session token and user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignIn {
    /// Signed session token for the Authorization header
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    /// The signed-in user, freshly provisioned on first sign-in
    pub user: User,
}
