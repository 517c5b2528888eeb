//! Configuration for the session service

use roost_shared::config::AuthConfig;

/// Configuration for the session service
#[derive(Debug, Clone)]
pub struct SessionServiceConfig {
    /// Secret used to sign and verify session tokens
    pub jwt_secret: String,
    /// Session token lifetime in minutes
    pub token_ttl_minutes: i64,
    /// Issuer claim stamped into and required from every token
    pub issuer: String,
    /// Audience claim stamped into and required from every token
    pub audience: String,
}

impl Default for SessionServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "dev-secret-change-in-production".to_string(),
            token_ttl_minutes: 60 * 24 * 30,
            issuer: "roost".to_string(),
            audience: "roost-api".to_string(),
        }
    }
}

impl From<&AuthConfig> for SessionServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            token_ttl_minutes: config.token_ttl_minutes,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}

impl SessionServiceConfig {
    /// Token lifetime in seconds, as reported to clients
    pub fn token_ttl_seconds(&self) -> i64 {
        self.token_ttl_minutes * 60
    }
}
