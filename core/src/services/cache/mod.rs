//! Page cache port
//!
//! Listing index pages are cached as opaque serialized strings. The
//! port deliberately has no per-key delete: consumers either read
//! through or blow away a whole prefix when the underlying data moves.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::DomainError;

/// Port for the page cache
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Fetch a cached value
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Store a value with a TTL in seconds
    ///
    /// Expiry is the store's own; there is no eviction policy on top.
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError>;

    /// Drop every key under a prefix, returning how many were removed
    async fn invalidate_prefix(&self, prefix: &str) -> Result<u64, DomainError>;
}

/// In-memory page cache for testing
///
/// TTLs are recorded but never enforced; tests drive staleness through
/// explicit invalidation.
pub struct MockPageCache {
    entries: Mutex<HashMap<String, String>>,
    should_fail: Mutex<bool>,
    invalidations: Mutex<Vec<String>>,
}

impl MockPageCache {
    /// Create a new empty mock cache
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            should_fail: Mutex::new(false),
            invalidations: Mutex::new(Vec::new()),
        }
    }

    /// Set whether every operation should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Prefixes passed to `invalidate_prefix`, in call order
    pub fn invalidations(&self) -> Vec<String> {
        self.invalidations.lock().unwrap().clone()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::Cache {
                message: "Mock cache failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockPageCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageCache for MockPageCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check_failure()?;
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str, _ttl_seconds: u64) -> Result<(), DomainError> {
        self.check_failure()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<u64, DomainError> {
        self.invalidations.lock().unwrap().push(prefix.to_string());
        self.check_failure()?;
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok((before - entries.len()) as u64)
    }
}
