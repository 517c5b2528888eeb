pub mod error;
pub mod listing;
pub mod message;
pub mod session;

pub use error::{ErrorResponse, ErrorResponseExt};
