//! Cache module for Redis-based caching
//!
//! This module provides the Redis client with retry logic and the
//! listing page cache built on top of it.

pub mod page_cache;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use page_cache::RedisPageCache;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use roost_shared::config::cache::CacheConfig;
