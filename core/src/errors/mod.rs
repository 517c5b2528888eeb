//! Domain-specific error types and error handling.

use thiserror::Error;

/// Core domain errors
///
/// Every fallible operation in the domain layer resolves to one of these
/// variants; the HTTP layer maps each variant to exactly one status code.
#[derive(Error, Debug)]
pub enum DomainError {
    /// No usable session accompanied the request
    #[error("Authentication required")]
    Unauthenticated,

    /// The caller is known but does not own the resource
    #[error("Not permitted to modify this resource")]
    Unauthorized,

    /// The referenced resource does not exist
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// The submission failed domain validation
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The backing store rejected or failed an operation
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Media could not be pushed to the blob store
    #[error("Upload failed: {message}")]
    UploadFailed { message: String },

    /// The cache layer failed; callers may treat this as degraded, not fatal
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// Anything that should never surface to a client in detail
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Shorthand for a `NotFound` over a named resource kind
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Shorthand for a `Validation` error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Shorthand for a `Persistence` error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence { message: message.into() }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
