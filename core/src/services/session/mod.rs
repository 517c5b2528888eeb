//! Session resolution and sign-in provisioning
//!
//! This module owns the ambient-session boundary: verifying bearer
//! tokens into request-scoped [`Session`](crate::domain::value_objects::Session)
//! values, resolving those sessions to stored users, and provisioning
//! users lazily on first sign-in.

mod config;
mod provider;
mod service;
mod tokens;

#[cfg(test)]
mod tests;

pub use config::SessionServiceConfig;
pub use provider::{IdentityProvider, MockIdentityProvider};
pub use service::SessionService;
pub use tokens::SessionClaims;
