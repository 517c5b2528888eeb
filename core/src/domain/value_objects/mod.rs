//! Value objects representing immutable domain concepts.

pub mod identity;
pub mod inbox;

// Re-export commonly used types
pub use identity::{Session, SignIn, UserIdentity, VerifiedProfile};
pub use inbox::InboxMessage;
