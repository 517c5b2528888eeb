//! Listing repository trait defining the interface for listing persistence.
//!
//! This module defines the repository pattern interface for Listing entities.
//! The trait is async-first and uses Result types for proper error handling;
//! implementations live in the infrastructure layer.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::listing::{Listing, NewListing};
use crate::errors::DomainError;

/// Filter applied to listing queries
///
/// All fields are optional; an empty filter matches every listing. The
/// same filter feeds both `find` and `count` so page data and totals
/// can never disagree about scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    /// Free-text term matched case-insensitively against the listing
    /// name, description, and every address field
    pub term: Option<String>,

    /// Exact property type, compared case-insensitively
    pub property_type: Option<String>,

    /// Restrict to listings owned by this user
    pub owner: Option<Uuid>,

    /// Restrict to featured (or non-featured) listings
    pub featured: Option<bool>,
}

impl ListingFilter {
    /// Check whether the filter constrains anything at all
    pub fn is_empty(&self) -> bool {
        self.term.is_none()
            && self.property_type.is_none()
            && self.owner.is_none()
            && self.featured.is_none()
    }

    /// Evaluate the filter against a listing in memory
    ///
    /// This is the reference semantics; the SQL implementation mirrors
    /// it with `LIKE` and equality predicates.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(term) = &self.term {
            let needle = term.to_lowercase();
            let haystacks = [
                listing.name.as_str(),
                listing.description.as_str(),
                listing.location.street.as_str(),
                listing.location.city.as_str(),
                listing.location.state.as_str(),
                listing.location.zipcode.as_str(),
            ];
            if !haystacks
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        if let Some(property_type) = &self.property_type {
            if !listing.property_type.eq_ignore_ascii_case(property_type) {
                return false;
            }
        }

        if let Some(owner) = self.owner {
            if listing.owner != owner {
                return false;
            }
        }

        if let Some(featured) = self.featured {
            if listing.is_featured != featured {
                return false;
            }
        }

        true
    }
}

/// Repository trait for Listing entity persistence operations
///
/// Implementations own identifier and timestamp assignment: `create`
/// receives a [`NewListing`] and returns the stored [`Listing`].
///
/// # Example
/// ```no_run
/// # use roost_core::repositories::{ListingFilter, ListingRepository};
/// # async fn example(repo: &impl ListingRepository) -> Result<(), Box<dyn std::error::Error>> {
/// let filter = ListingFilter {
///     term: Some("boston".to_string()),
///     ..Default::default()
/// };
///
/// let total = repo.count(&filter).await?;
/// let page = repo.find(&filter, 0, 9).await?;
/// println!("showing {} of {} listings", page.len(), total);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Persist a new listing
    ///
    /// # Returns
    /// * `Ok(Listing)` - The stored listing with assigned id and timestamps
    /// * `Err(DomainError)` - The store rejected or failed the insert
    async fn create(&self, new: NewListing) -> Result<Listing, DomainError>;

    /// Find a listing by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(Listing))` - Listing found
    /// * `Ok(None)` - No listing with the given id
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DomainError>;

    /// Find listings matching a filter, newest first
    ///
    /// Results are ordered by `created_at` descending with `id`
    /// descending as the tie-breaker, so pages are stable even when
    /// listings share a creation timestamp.
    async fn find(
        &self,
        filter: &ListingFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Listing>, DomainError>;

    /// Count listings matching a filter
    async fn count(&self, filter: &ListingFilter) -> Result<u64, DomainError>;

    /// Delete a listing by id
    ///
    /// # Returns
    /// * `Ok(true)` - Listing was deleted
    /// * `Ok(false)` - Listing not found
    /// * `Err(DomainError)` - Deletion failed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
