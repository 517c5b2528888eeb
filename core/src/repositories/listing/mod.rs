//! Listing repository module.

mod r#trait;
pub use r#trait::{ListingFilter, ListingRepository};

mod mock;
pub use mock::MockListingRepository;
