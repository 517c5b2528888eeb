//! Common type definitions shared across the workspace

pub mod pagination;

pub use pagination::{PaginatedResponse, Pagination};
