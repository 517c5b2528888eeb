//! Redis-backed listing page cache
//!
//! Implements the domain's `PageCache` port on top of [`RedisClient`].
//! Keys are namespaced with the configured prefix so several
//! deployments can share one Redis instance.

use async_trait::async_trait;

use roost_core::errors::DomainError;
use roost_core::services::cache::PageCache;
use roost_shared::config::cache::CacheConfig;

use crate::cache::redis_client::RedisClient;
use crate::InfrastructureError;

/// Redis implementation of the page cache port
pub struct RedisPageCache {
    client: RedisClient,
    config: CacheConfig,
}

impl RedisPageCache {
    /// Create a new page cache over an existing Redis client
    pub fn new(client: RedisClient, config: CacheConfig) -> Self {
        Self { client, config }
    }

    fn full_key(&self, key: &str) -> String {
        self.config.make_key(key)
    }
}

#[async_trait]
impl PageCache for RedisPageCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.client
            .get(&self.full_key(key))
            .await
            .map_err(cache_error)
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        self.client
            .set_with_expiry(&self.full_key(key), value, ttl_seconds)
            .await
            .map_err(cache_error)
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<u64, DomainError> {
        self.client
            .delete_by_prefix(&self.full_key(prefix))
            .await
            .map_err(cache_error)
    }
}

fn cache_error(e: InfrastructureError) -> DomainError {
    DomainError::Cache {
        message: e.to_string(),
    }
}
