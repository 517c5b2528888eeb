//! Integration tests for the Redis page cache
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p roost_infra --test redis_integration -- --ignored

use rand::Rng;

use roost_core::services::cache::PageCache;
use roost_infra::cache::{CacheConfig, RedisClient, RedisPageCache};

fn test_config() -> CacheConfig {
    CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
}

/// Unique prefix per test run so parallel runs never collide
fn test_prefix() -> String {
    let suffix: u32 = rand::thread_rng().gen();
    format!("test:pages:{}", suffix)
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let client = RedisClient::new(test_config()).await;
    assert!(client.is_ok(), "Failed to connect to Redis");
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_page_round_trip() {
    let client = RedisClient::new(test_config()).await.unwrap();
    let cache = RedisPageCache::new(client, test_config());
    let prefix = test_prefix();
    let key = format!("{}:1:9", prefix);

    cache.put(&key, r#"{"data":[]}"#, 60).await.unwrap();

    let cached = cache.get(&key).await.unwrap();
    assert_eq!(cached.as_deref(), Some(r#"{"data":[]}"#));

    // Clean up
    cache.invalidate_prefix(&prefix).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_invalidate_prefix_only_touches_matching_keys() {
    let client = RedisClient::new(test_config()).await.unwrap();
    let cache = RedisPageCache::new(client, test_config());
    let prefix = test_prefix();
    let other_prefix = test_prefix();

    cache.put(&format!("{}:1:9", prefix), "a", 60).await.unwrap();
    cache.put(&format!("{}:2:9", prefix), "b", 60).await.unwrap();
    cache
        .put(&format!("{}:1:9", other_prefix), "c", 60)
        .await
        .unwrap();

    let removed = cache.invalidate_prefix(&prefix).await.unwrap();
    assert_eq!(removed, 2);

    assert_eq!(cache.get(&format!("{}:1:9", prefix)).await.unwrap(), None);
    assert_eq!(
        cache.get(&format!("{}:1:9", other_prefix)).await.unwrap(),
        Some("c".to_string())
    );

    // Clean up
    cache.invalidate_prefix(&other_prefix).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_pages_expire() {
    let client = RedisClient::new(test_config()).await.unwrap();
    let cache = RedisPageCache::new(client, test_config());
    let key = format!("{}:expiry", test_prefix());

    cache.put(&key, "short-lived", 2).await.unwrap();
    assert!(cache.get(&key).await.unwrap().is_some());

    tokio::time::sleep(tokio::time::Duration::from_secs(3)).await;

    assert_eq!(cache.get(&key).await.unwrap(), None);
}
