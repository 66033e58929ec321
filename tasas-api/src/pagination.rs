//! Pagination utilities

use serde::Serialize;

/// Page size for every paginated endpoint
pub const PAGE_SIZE: i64 = 50;

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    pub total_pages: i64,
    /// Offset for SQL LIMIT/OFFSET query
    pub offset: i64,
}

/// Calculate pagination metadata, clamping the page to `[1, total_pages]`
///
/// ```
/// use tasas_api::pagination::calculate_pagination;
///
/// let p = calculate_pagination(120, 2);
/// assert_eq!((p.page, p.total_pages, p.offset), (2, 3, 50));
///
/// let p = calculate_pagination(120, 99);
/// assert_eq!(p.page, 3);
/// ```
pub fn calculate_pagination(total_results: i64, requested_page: i64) -> Pagination {
    let total_pages = (total_results + PAGE_SIZE - 1) / PAGE_SIZE;
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * PAGE_SIZE;

    Pagination {
        page,
        total_pages,
        offset,
    }
}

/// Paginated response envelope
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub total_results: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total_results: i64, pagination: Pagination, results: Vec<T>) -> Self {
        Self {
            total_results,
            page: pagination.page,
            page_size: PAGE_SIZE,
            total_pages: pagination.total_pages,
            results,
        }
    }
}
