//! MySQL repository implementations

pub mod listing_repository;
pub mod message_repository;
pub mod user_repository;

pub use listing_repository::MySqlListingRepository;
pub use message_repository::MySqlMessageRepository;
pub use user_repository::MySqlUserRepository;
