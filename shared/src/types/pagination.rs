//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl Pagination {
    /// Create a new pagination with custom values
    ///
    /// Out-of-range values are clamped rather than rejected, so a
    /// hand-edited query string never produces an error page.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(MIN_PAGE),
            per_page: per_page.clamp(MIN_PER_PAGE, MAX_PER_PAGE),
        }
    }

    /// Validate and sanitize pagination parameters
    ///
    /// Deserialized values bypass `new`, so query extractors call this
    /// before use.
    pub fn validate(mut self) -> Self {
        self.page = self.page.max(MIN_PAGE);
        self.per_page = self.per_page.clamp(MIN_PER_PAGE, MAX_PER_PAGE);
        self
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)) * self.per_page
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> u32 {
        self.per_page
    }

    /// Calculate offset as i64 for SQL queries
    pub fn offset_i64(&self) -> i64 {
        self.offset() as i64
    }

    /// Calculate limit as i64 for SQL queries
    pub fn limit_i64(&self) -> i64 {
        self.limit() as i64
    }

    /// Check if this is the first page
    pub fn is_first_page(&self) -> bool {
        self.page == MIN_PAGE
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The actual data items
    pub data: Vec<T>,

    /// Current page number
    pub page: u32,

    /// Items per page
    pub per_page: u32,

    /// Total number of items matching the query
    pub total: u64,

    /// Total number of pages
    pub total_pages: u32,

    /// Whether there is a page after this one
    pub has_next: bool,

    /// Whether there is a page before this one
    pub has_prev: bool,

    /// Whether clients should render pagination controls
    ///
    /// True exactly when the result set spans more than one page.
    pub show_pagination: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(data: Vec<T>, pagination: Pagination, total: u64) -> Self {
        let total_pages = Self::calculate_total_pages(total, pagination.per_page);
        Self {
            data,
            page: pagination.page,
            per_page: pagination.per_page,
            total,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1 && total_pages > 0,
            show_pagination: total > pagination.per_page as u64,
        }
    }

    /// Create an empty paginated response
    pub fn empty(pagination: Pagination) -> Self {
        Self {
            data: Vec::new(),
            page: pagination.page,
            per_page: pagination.per_page,
            total: 0,
            total_pages: 0,
            has_next: false,
            has_prev: false,
            show_pagination: false,
        }
    }

    /// Calculate total pages from total items and items per page
    fn calculate_total_pages(total: u64, per_page: u32) -> u32 {
        if total == 0 {
            return 0;
        }
        ((total as f64) / (per_page as f64)).ceil() as u32
    }

    /// Transform the data items using a function
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
            show_pagination: self.show_pagination,
        }
    }

    /// Check if the response is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// Constants
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 9;
const MIN_PAGE: u32 = 1;
const MIN_PER_PAGE: u32 = 1;
const MAX_PER_PAGE: u32 = 100;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Pagination::default();
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 9);
    }

    #[test]
    fn test_new_clamps_out_of_range_values() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 1);

        let p = Pagination::new(3, 500);
        assert_eq!(p.page, 3);
        assert_eq!(p.per_page, 100);
    }

    #[test]
    fn test_validate_matches_new() {
        let raw = Pagination { page: 0, per_page: 1000 };
        assert_eq!(raw.validate(), Pagination::new(0, 1000));
    }

    #[test]
    fn test_offset() {
        assert_eq!(Pagination::new(1, 9).offset(), 0);
        assert_eq!(Pagination::new(2, 9).offset(), 9);
        assert_eq!(Pagination::new(4, 25).offset(), 75);
    }

    #[test]
    fn test_show_pagination_only_when_total_exceeds_page_size() {
        let page = Pagination::new(1, 9);

        let exact: PaginatedResponse<u32> = PaginatedResponse::new(vec![1; 9], page, 9);
        assert!(!exact.show_pagination);
        assert_eq!(exact.total_pages, 1);

        let overflow: PaginatedResponse<u32> = PaginatedResponse::new(vec![1; 9], page, 10);
        assert!(overflow.show_pagination);
        assert_eq!(overflow.total_pages, 2);
        assert!(overflow.has_next);
        assert!(!overflow.has_prev);
    }

    #[test]
    fn test_empty_response() {
        let resp: PaginatedResponse<u32> = PaginatedResponse::empty(Pagination::default());
        assert!(resp.is_empty());
        assert_eq!(resp.total_pages, 0);
        assert!(!resp.show_pagination);
    }
}
