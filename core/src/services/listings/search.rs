//! Listing search, browse, and detail reads

use std::sync::Arc;
use uuid::Uuid;

use roost_shared::types::{PaginatedResponse, Pagination};

use crate::domain::entities::listing::Listing;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ListingFilter, ListingRepository};
use crate::services::cache::PageCache;

use super::LISTING_PAGES_PREFIX;

/// Sentinel property type meaning "no type constraint"
pub const PROPERTY_TYPE_ALL: &str = "All";

/// Listings that match only the featured flag, home page sized
const FEATURED_LIMIT: i64 = 24;

/// Upper bound on listings returned for one owner
const OWNER_LIMIT: i64 = 100;

/// A page of listings with pagination metadata
pub type PaginatedListings = PaginatedResponse<Listing>;

/// Free-text search parameters
///
/// Both fields are optional; an empty query is a plain browse. The
/// sentinel type [`PROPERTY_TYPE_ALL`] (any casing) also means
/// unconstrained, mirroring the search form's "All" option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Term matched against names, descriptions, and addresses
    pub term: Option<String>,

    /// Property type, exact match unless empty or "All"
    pub property_type: Option<String>,
}

impl SearchQuery {
    /// Lower the query into a repository filter
    pub fn into_filter(self) -> ListingFilter {
        let term = self
            .term
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let property_type = self
            .property_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case(PROPERTY_TYPE_ALL));

        ListingFilter {
            term,
            property_type,
            ..Default::default()
        }
    }
}

/// Configuration for the search service
#[derive(Debug, Clone)]
pub struct SearchServiceConfig {
    /// TTL for cached index pages in seconds
    pub page_ttl_seconds: u64,
}

impl Default for SearchServiceConfig {
    fn default() -> Self {
        Self { page_ttl_seconds: 60 }
    }
}

/// Service owning the listing read path
///
/// Browse and featured reads flow through the page cache; search and
/// per-owner reads always hit the repository. Cache trouble degrades
/// to direct reads, never to an error.
pub struct ListingSearchService<L, C>
where
    L: ListingRepository,
    C: PageCache,
{
    listing_repository: Arc<L>,
    page_cache: Arc<C>,
    config: SearchServiceConfig,
}

impl<L, C> ListingSearchService<L, C>
where
    L: ListingRepository,
    C: PageCache,
{
    /// Create a new search service
    pub fn new(listing_repository: Arc<L>, page_cache: Arc<C>, config: SearchServiceConfig) -> Self {
        Self {
            listing_repository,
            page_cache,
            config,
        }
    }

    /// Free-text search with the same pagination semantics as browse
    pub async fn search(
        &self,
        query: SearchQuery,
        page: Pagination,
    ) -> DomainResult<PaginatedListings> {
        let page = page.validate();
        let filter = query.into_filter();
        self.fetch_page(&filter, page).await
    }

    /// Browse all listings, newest first, through the page cache
    pub async fn browse(&self, page: Pagination) -> DomainResult<PaginatedListings> {
        let page = page.validate();
        let key = format!("{}:{}:{}", LISTING_PAGES_PREFIX, page.page, page.per_page);

        if let Some(cached) = self.cache_lookup(&key).await {
            return Ok(cached);
        }

        let result = self.fetch_page(&ListingFilter::default(), page).await?;
        self.cache_store(&key, &result).await;
        Ok(result)
    }

    /// Featured listings for the home page, through the page cache
    pub async fn featured(&self) -> DomainResult<Vec<Listing>> {
        let key = format!("{}:featured", LISTING_PAGES_PREFIX);

        if let Some(cached) = self.cache_lookup::<Vec<Listing>>(&key).await {
            return Ok(cached);
        }

        let filter = ListingFilter {
            featured: Some(true),
            ..Default::default()
        };
        let listings = self.listing_repository.find(&filter, 0, FEATURED_LIMIT).await?;
        self.cache_store(&key, &listings).await;
        Ok(listings)
    }

    /// All listings owned by one user, newest first
    pub async fn by_owner(&self, owner: Uuid) -> DomainResult<Vec<Listing>> {
        let filter = ListingFilter {
            owner: Some(owner),
            ..Default::default()
        };
        self.listing_repository.find(&filter, 0, OWNER_LIMIT).await
    }

    /// Fetch a single listing by id
    pub async fn get(&self, id: Uuid) -> DomainResult<Listing> {
        self.listing_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing"))
    }

    /// Count plus page fetch under one filter
    ///
    /// The same filter feeds both queries, so the page and its total
    /// can never disagree about scope.
    async fn fetch_page(
        &self,
        filter: &ListingFilter,
        page: Pagination,
    ) -> DomainResult<PaginatedListings> {
        let total = self.listing_repository.count(filter).await?;
        let listings = self
            .listing_repository
            .find(filter, page.offset_i64(), page.limit_i64())
            .await?;
        Ok(PaginatedResponse::new(listings, page, total))
    }

    async fn cache_lookup<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.page_cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(%key, error = %e, "discarding undecodable cached page");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(%key, error = %e, "page cache read failed, falling back to repository");
                None
            }
        }
    }

    async fn cache_store<T: serde::Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(%key, error = %e, "failed to serialize page for caching");
                return;
            }
        };
        if let Err(e) = self.page_cache.put(key, &raw, self.config.page_ttl_seconds).await {
            tracing::warn!(%key, error = %e, "page cache write failed");
        }
    }
}
