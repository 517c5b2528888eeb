//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// TTL for cached listing pages in seconds
    #[serde(default = "default_page_ttl")]
    pub page_ttl: u64,

    /// Cache key prefix, used to namespace keys when several
    /// deployments share one Redis instance
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            max_connections: 10,
            connection_timeout: 5,
            page_ttl: default_page_ttl(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let max_connections = std::env::var("REDIS_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);
        let page_ttl = std::env::var("CACHE_PAGE_TTL")
            .unwrap_or_else(|_| default_page_ttl().to_string())
            .parse()
            .unwrap_or_else(|_| default_page_ttl());

        Self {
            url,
            max_connections,
            page_ttl,
            ..Default::default()
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_page_ttl() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key_without_prefix() {
        let config = CacheConfig::default();
        assert_eq!(config.make_key("pages:listings:1"), "pages:listings:1");
    }

    #[test]
    fn test_make_key_with_prefix() {
        let config = CacheConfig::default().with_prefix("roost");
        assert_eq!(config.make_key("pages:listings:1"), "roost:pages:listings:1");
    }
}
