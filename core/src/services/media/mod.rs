//! Media ingestion for listing images
//!
//! Listing images arrive as raw bytes, are re-encoded as data URIs, and
//! are pushed to an external blob store through the [`MediaStore`]
//! port. Only the returned URLs ever reach the rest of the system.

mod config;
mod service;
mod store;

#[cfg(test)]
mod tests;

pub use config::MediaServiceConfig;
pub use service::{ImageFile, MediaService};
pub use store::{MediaStore, MockMediaStore, StoredMedia};
