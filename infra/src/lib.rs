//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Roost backend.
//! It provides concrete implementations for database access, caching, and
//! the external media and identity services the domain layer defines ports for.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL repository implementations using SQLx
//! - **Cache**: Redis client and the listing page cache
//! - **Media**: Cloudinary blob store adapter
//! - **Identity**: Google ID token verification
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

// Re-export core types for convenience
pub use roost_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and page cache
pub mod cache;

/// Media module - Cloudinary adapter
pub mod media;

/// Identity module - External identity providers
pub mod identity;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Media store error
    #[error("Media store error: {0}")]
    Media(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
