//! Business services containing domain logic and use cases.

pub mod cache;
pub mod listings;
pub mod media;
pub mod messages;
pub mod session;

// Re-export commonly used types
pub use cache::{MockPageCache, PageCache};
pub use listings::{
    CreatedListing, ListingLifecycleService, ListingSearchService, ListingSubmission,
    PaginatedListings, SearchQuery, SearchServiceConfig, LISTING_PAGES_PREFIX, PROPERTY_TYPE_ALL,
};
pub use media::{ImageFile, MediaService, MediaServiceConfig, MediaStore, MockMediaStore, StoredMedia};
pub use messages::MessageService;
pub use session::{
    IdentityProvider, MockIdentityProvider, SessionClaims, SessionService, SessionServiceConfig,
};
