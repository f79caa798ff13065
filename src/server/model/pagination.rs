//! Page requests and paginated results.

use crate::{model::api::PaginationDto, server::util::parse::parse_positive_u64};

/// Highest page number accepted; keeps `offset` within a signed 64-bit column.
pub const MAX_PAGE: u64 = u32::MAX as u64;

/// A validated, one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// One-based page number.
    pub page: u64,
    /// Items per page, already capped.
    pub limit: u64,
}

impl PageRequest {
    /// Builds a page request from optional query values.
    ///
    /// Missing values fall back to page 1 and `default_limit`; the page is
    /// capped at `MAX_PAGE` and the limit at `max_limit`.
    pub fn new(page: Option<u64>, limit: Option<u64>, default_limit: u64, max_limit: u64) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            limit: limit.unwrap_or(default_limit).clamp(1, max_limit),
        }
    }

    /// Builds a page request from raw `?page=&limit=` strings.
    ///
    /// Malformed, zero and negative values behave like missing ones.
    pub fn from_query(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: u64,
        max_limit: u64,
    ) -> Self {
        Self::new(
            parse_positive_u64(page),
            parse_positive_u64(limit),
            default_limit,
            max_limit,
        )
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of results with the total row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.request.limit)
    }

    pub fn pagination_dto(&self) -> PaginationDto {
        PaginationDto {
            page: self.request.page,
            limit: self.request.limit,
            total: self.total,
            total_pages: self.total_pages(),
            has_next: self.request.page.saturating_mul(self.request.limit) < self.total,
            has_prev: self.request.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_defaults_and_caps_limit() {
        let request = PageRequest::new(None, Some(500), 50, 100);
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 100);

        let request = PageRequest::new(Some(3), None, 10, 50);
        assert_eq!(request.limit, 10);
        assert_eq!(request.offset(), 20);
    }

    #[test]
    fn ignores_malformed_query_values() {
        let request = PageRequest::from_query(Some("abc"), Some("-5"), 20, 100);
        assert_eq!(request, PageRequest { page: 1, limit: 20 });

        let request = PageRequest::from_query(Some("2"), Some("30"), 20, 100);
        assert_eq!(request, PageRequest { page: 2, limit: 30 });
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let request = PageRequest::from_query(Some("18446744073709551615"), None, 10, 50);
        assert_eq!(request.page, MAX_PAGE);
        assert_eq!(request.offset(), (MAX_PAGE - 1) * 10);

        let page: Page<u8> = Page::new(vec![], 25, request);
        let dto = page.pagination_dto();
        assert!(!dto.has_next);
        assert!(dto.has_prev);
    }

    #[test]
    fn computes_navigation_flags() {
        let page: Page<u8> = Page::new(vec![], 25, PageRequest::new(Some(2), Some(10), 10, 50));
        let dto = page.pagination_dto();

        assert_eq!(dto.total_pages, 3);
        assert!(dto.has_next);
        assert!(dto.has_prev);

        let last: Page<u8> = Page::new(vec![], 25, PageRequest::new(Some(3), Some(10), 10, 50));
        assert!(!last.pagination_dto().has_next);
    }
}
