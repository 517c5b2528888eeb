//! HTTP route handlers
//!
//! One module per resource area:
//! - `session` - Sign-in and identity resolution
//! - `listings` - Browse, search, detail, create, delete
//! - `messages` - The signed-in user's inbox

pub mod listings;
pub mod messages;
pub mod session;
