//! Listing lifecycle service: create and delete

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::listing::{Location, NewListing, Rates, SellerInfo};
use crate::domain::value_objects::identity::Session;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ListingRepository, UserRepository};
use crate::services::cache::PageCache;
use crate::services::media::{ImageFile, MediaService, MediaStore};
use crate::services::session::SessionService;

use super::LISTING_PAGES_PREFIX;

/// A listing submission as it arrives from the HTTP boundary
///
/// Shapes have already been schema-checked there; this type carries
/// semantically meaningful fields plus the raw image files.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSubmission {
    pub name: String,
    pub property_type: String,
    pub description: String,
    pub location: Location,
    pub beds: u32,
    pub baths: f64,
    pub square_feet: u32,
    pub amenities: Vec<String>,
    pub rates: Rates,
    pub seller_info: SellerInfo,
    /// Image files in the order the owner arranged them
    pub images: Vec<ImageFile>,
}

/// Outcome of a successful listing creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedListing {
    /// Identifier assigned by the store
    pub id: Uuid,

    /// Path of the new listing's detail resource
    ///
    /// The HTTP layer turns this into the `Location` response header;
    /// clients navigate there instead of the service rendering anything.
    pub detail_path: String,
}

/// Service owning the listing write path
pub struct ListingLifecycleService<L, U, M, C>
where
    L: ListingRepository,
    U: UserRepository,
    M: MediaStore,
    C: PageCache,
{
    listing_repository: Arc<L>,
    session_service: Arc<SessionService<U>>,
    media_service: Arc<MediaService<M>>,
    page_cache: Arc<C>,
}

impl<L, U, M, C> ListingLifecycleService<L, U, M, C>
where
    L: ListingRepository,
    U: UserRepository,
    M: MediaStore,
    C: PageCache,
{
    /// Create a new lifecycle service
    pub fn new(
        listing_repository: Arc<L>,
        session_service: Arc<SessionService<U>>,
        media_service: Arc<MediaService<M>>,
        page_cache: Arc<C>,
    ) -> Self {
        Self {
            listing_repository,
            session_service,
            media_service,
            page_cache,
        }
    }

    /// Create a listing from a submission
    ///
    /// Ordering is load-bearing: identity resolution and validation
    /// run before the first upload, so an unauthenticated or invalid
    /// submission leaves no trace anywhere. A failure after ingestion
    /// can orphan uploaded blobs; that gap is accepted and logged
    /// rather than papered over with a rollback.
    pub async fn create(
        &self,
        session: Option<&Session>,
        submission: ListingSubmission,
    ) -> DomainResult<CreatedListing> {
        let identity = self.session_service.resolve(session).await?;
        let submission = validate_submission(submission)?;

        let images = self.media_service.ingest(&submission.images).await?;

        let new_listing = NewListing {
            owner: identity.user_id,
            name: submission.name,
            property_type: submission.property_type,
            description: submission.description,
            location: submission.location,
            beds: submission.beds,
            baths: submission.baths,
            square_feet: submission.square_feet,
            amenities: submission.amenities,
            rates: submission.rates,
            seller_info: submission.seller_info,
            images,
            is_featured: false,
        };

        let listing = self.listing_repository.create(new_listing).await?;
        tracing::info!(listing_id = %listing.id, owner = %listing.owner, "listing created");

        self.invalidate_index_pages().await;

        Ok(CreatedListing {
            id: listing.id,
            detail_path: format!("/api/v1/listings/{}", listing.id),
        })
    }

    /// Delete a listing owned by the session user
    ///
    /// The ownership check runs before anything destructive. Blob
    /// removal is best-effort; the row deletion is what decides the
    /// outcome.
    pub async fn delete(&self, session: Option<&Session>, id: Uuid) -> DomainResult<()> {
        let identity = self.session_service.resolve(session).await?;

        let listing = self
            .listing_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing"))?;

        if !listing.is_owned_by(identity.user_id) {
            tracing::warn!(
                listing_id = %id,
                owner = %listing.owner,
                caller = %identity.user_id,
                "delete refused: caller does not own the listing"
            );
            return Err(DomainError::Unauthorized);
        }

        self.media_service.remove(&listing.images).await;

        let deleted = self.listing_repository.delete(id).await?;
        if !deleted {
            // Lost a race with another delete of the same listing
            return Err(DomainError::not_found("Listing"));
        }
        tracing::info!(listing_id = %id, "listing deleted");

        self.invalidate_index_pages().await;
        Ok(())
    }

    async fn invalidate_index_pages(&self) {
        match self.page_cache.invalidate_prefix(LISTING_PAGES_PREFIX).await {
            Ok(dropped) => {
                tracing::debug!(dropped, "invalidated cached listing pages");
            }
            Err(e) => {
                // Stale pages age out via TTL, so this is not fatal
                tracing::warn!(error = %e, "failed to invalidate cached listing pages");
            }
        }
    }
}

/// Validate and normalize a submission
///
/// Name and property type are required; amenities are de-duplicated
/// case-sensitively, keeping first occurrences in order.
fn validate_submission(mut submission: ListingSubmission) -> DomainResult<ListingSubmission> {
    submission.name = submission.name.trim().to_string();
    submission.property_type = submission.property_type.trim().to_string();

    if submission.name.is_empty() {
        return Err(DomainError::validation("Listing name is required"));
    }
    if submission.property_type.is_empty() {
        return Err(DomainError::validation("Property type is required"));
    }

    submission.amenities = dedup_preserving_order(submission.amenities);
    Ok(submission)
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
