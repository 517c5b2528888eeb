//! User entity representing a signed-in member of Roost.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a stored username, in characters
pub const MAX_USERNAME_LEN: usize = 20;

/// User entity provisioned lazily on first sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, unique across all users
    pub email: String,

    /// Display name, truncated to [`MAX_USERNAME_LEN`] characters
    pub username: String,

    /// Avatar URL from the identity provider
    pub image_url: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    ///
    /// The username is truncated to [`MAX_USERNAME_LEN`] characters on a
    /// character boundary, matching what the sign-up form enforces.
    pub fn new(email: String, username: String, image_url: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            username: truncate_username(&username),
            image_url,
            created_at: now,
            updated_at: now,
        }
    }
}

fn truncate_username(username: &str) -> String {
    username.chars().take(MAX_USERNAME_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_username_kept_verbatim() {
        let user = User::new("a@b.test".to_string(), "Jo".to_string(), None);
        assert_eq!(user.username, "Jo");
    }

    #[test]
    fn test_long_username_truncated_to_limit() {
        let long = "a".repeat(MAX_USERNAME_LEN + 15);
        let user = User::new("a@b.test".to_string(), long, None);
        assert_eq!(user.username.chars().count(), MAX_USERNAME_LEN);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let name = "ü".repeat(MAX_USERNAME_LEN + 1);
        let user = User::new("a@b.test".to_string(), name, None);
        assert_eq!(user.username.chars().count(), MAX_USERNAME_LEN);
    }
}
