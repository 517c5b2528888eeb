//! Request and response shapes for session endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use roost_core::domain::entities::user::User;
use roost_core::domain::value_objects::identity::{SignIn, UserIdentity};

/// Body of `POST /api/v1/auth/session`
///
/// Carries the id token obtained from the identity provider's browser
/// flow; the API never sees provider credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EstablishSessionRequest {
    #[validate(length(min = 1, message = "id_token must not be empty"))]
    pub id_token: String,
}

/// A user as rendered to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            image_url: user.image_url,
            created_at: user.created_at,
        }
    }
}

/// Successful sign-in response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    /// Session token for the `Authorization: Bearer` header
    pub token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: UserResponse,
}

impl From<SignIn> for SignInResponse {
    fn from(sign_in: SignIn) -> Self {
        Self {
            token: sign_in.token,
            token_type: "Bearer".to_string(),
            expires_in: sign_in.expires_in,
            user: sign_in.user.into(),
        }
    }
}

/// Response of `GET /api/v1/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
}

impl From<UserIdentity> for IdentityResponse {
    fn from(identity: UserIdentity) -> Self {
        Self {
            user_id: identity.user_id,
            email: identity.email,
            username: identity.username,
        }
    }
}
