//! Listing lifecycle and read-side services
//!
//! The write path (create, delete) lives in [`lifecycle`]; the read
//! path (browse, search, featured, detail) in [`search`]. Both sides
//! share one cache namespace so every write can invalidate every
//! cached index page.

mod lifecycle;
mod search;

#[cfg(test)]
mod tests;

pub use lifecycle::{CreatedListing, ListingLifecycleService, ListingSubmission};
pub use search::{
    ListingSearchService, PaginatedListings, SearchQuery, SearchServiceConfig, PROPERTY_TYPE_ALL,
};

/// Cache key prefix for every cached listing index page
pub const LISTING_PAGES_PREFIX: &str = "pages:listings";
