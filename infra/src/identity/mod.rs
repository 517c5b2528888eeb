//! Identity module - External identity providers

pub mod google;

pub use google::GoogleIdentityProvider;
