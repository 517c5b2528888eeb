//! Session token claims and helpers

use chrono::{Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::entities::user::User;

/// Length of the random token identifier
const JTI_LEN: usize = 32;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user id)
    pub sub: String,

    /// Email of the signed-in user
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Unique identifier for the token
    pub jti: String,
}

impl SessionClaims {
    /// Creates claims for a session token
    pub fn new(user: &User, ttl_minutes: i64, issuer: &str, audience: &str) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::minutes(ttl_minutes);

        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: generate_jti(),
        }
    }
}

/// Generates a random alphanumeric token identifier
fn generate_jti() -> String {
    let mut rng = rand::thread_rng();
    (0..JTI_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..62);
            match idx {
                0..10 => (b'0' + idx) as char,
                10..36 => (b'a' + idx - 10) as char,
                36..62 => (b'A' + idx - 36) as char,
                _ => unreachable!(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jti_is_alphanumeric_and_unique() {
        let a = generate_jti();
        let b = generate_jti();
        assert_eq!(a.len(), JTI_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_claims_carry_user_and_expiry() {
        let user = User::new("kay@example.com".to_string(), "Kay".to_string(), None);
        let claims = SessionClaims::new(&user, 30, "roost", "roost-api");

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, "kay@example.com");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert_eq!(claims.iss, "roost");
    }
}
