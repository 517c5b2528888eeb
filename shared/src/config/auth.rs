//! Authentication configuration module

use serde::{Deserialize, Serialize};

/// Session token and identity provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret used to sign session tokens (HS256)
    pub jwt_secret: String,

    /// Session token lifetime in minutes
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,

    /// Token issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Token audience claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Google OAuth client id, used to verify sign-in tokens
    #[serde(default)]
    pub google_client_id: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from("dev-secret-change-in-production"),
            token_ttl_minutes: default_token_ttl_minutes(),
            issuer: default_issuer(),
            audience: default_audience(),
            google_client_id: String::new(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "dev-secret-change-in-production".to_string()),
            token_ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_token_ttl_minutes),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| default_issuer()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| default_audience()),
            google_client_id: std::env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
        }
    }

    /// Create a new configuration with an explicit secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }

    /// Set the token lifetime in minutes
    pub fn with_token_ttl_minutes(mut self, minutes: i64) -> Self {
        self.token_ttl_minutes = minutes;
        self
    }

    /// Check whether the signing secret is still the development default
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == "dev-secret-change-in-production"
    }
}

fn default_token_ttl_minutes() -> i64 {
    60 * 24 * 30  // 30 days, matching browser session lifetime
}

fn default_issuer() -> String {
    String::from("roost")
}

fn default_audience() -> String {
    String::from("roost-api")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl_minutes, 43200);
        assert_eq!(config.issuer, "roost");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_builder() {
        let config = AuthConfig::new("top-secret").with_token_ttl_minutes(15);
        assert_eq!(config.token_ttl_minutes, 15);
        assert!(!config.is_using_default_secret());
    }
}
