//! Domain entities representing core business objects.

pub mod listing;
pub mod message;
pub mod user;

// Re-export commonly used types
pub use listing::{Listing, Location, NewListing, Rates, SellerInfo};
pub use message::Message;
pub use user::{User, MAX_USERNAME_LEN};
