//! Mock implementation of ListingRepository for testing.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::listing::{Listing, NewListing};
use crate::errors::DomainError;

use super::r#trait::{ListingFilter, ListingRepository};

/// Mock implementation of ListingRepository for testing
///
/// Stores listings in memory and mirrors the ordering guarantees of the
/// SQL implementation. `set_should_fail` makes every operation return a
/// persistence error, for exercising failure paths.
pub struct MockListingRepository {
    listings: Arc<Mutex<Vec<Listing>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockListingRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            listings: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Seed the mock with an existing listing
    pub fn insert(&self, listing: Listing) {
        self.listings.lock().unwrap().push(listing);
    }

    /// Number of stored listings
    pub fn len(&self) -> usize {
        self.listings.lock().unwrap().len()
    }

    /// Whether the mock holds no listings
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::Persistence {
                message: "Mock listing repository failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockListingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingRepository for MockListingRepository {
    async fn create(&self, new: NewListing) -> Result<Listing, DomainError> {
        self.check_failure()?;
        let listing = new.into_listing(Uuid::new_v4(), Utc::now());
        self.listings.lock().unwrap().push(listing.clone());
        Ok(listing)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DomainError> {
        self.check_failure()?;
        let listings = self.listings.lock().unwrap();
        Ok(listings.iter().find(|l| l.id == id).cloned())
    }

    async fn find(
        &self,
        filter: &ListingFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Listing>, DomainError> {
        self.check_failure()?;
        let listings = self.listings.lock().unwrap();
        let mut matched: Vec<Listing> = listings
            .iter()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect();
        // Same order as the SQL implementation: newest first, id as tie-breaker
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(matched
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self, filter: &ListingFilter) -> Result<u64, DomainError> {
        self.check_failure()?;
        let listings = self.listings.lock().unwrap();
        Ok(listings.iter().filter(|l| filter.matches(l)).count() as u64)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut listings = self.listings.lock().unwrap();
        let before = listings.len();
        listings.retain(|l| l.id != id);
        Ok(listings.len() < before)
    }
}
