pub mod listing;
pub mod message;
pub mod user;

pub use listing::{ListingFilter, ListingRepository, MockListingRepository};
pub use message::{MessageRepository, MockMessageRepository};
pub use user::{MockUserRepository, UserRepository};
