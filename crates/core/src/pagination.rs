//! Pagination primitives shared by list endpoints.

use serde::Serialize;

/// Hard ceiling on page size; larger requests are clamped, not rejected.
pub const MAX_PER_PAGE: i64 = 100;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Normalized pagination request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    page: i64,
    per_page: i64,
}

impl PageParams {
    /// Normalize raw query values: page is at least 1, per_page is clamped
    /// into `[1, MAX_PER_PAGE]`.
    pub fn clamped(page: Option<i64>, per_page: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
        Self { page, per_page }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Row offset for the current page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub per_page: i64,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
}

impl PageInfo {
    pub fn new(total_items: i64, params: PageParams) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + params.per_page - 1) / params.per_page
        };
        let has_next = params.page < total_pages;
        let has_prev = params.page > 1 && total_pages > 0;
        Self {
            total_items,
            total_pages,
            current_page: params.page,
            per_page: params.per_page,
            has_next,
            has_prev,
            next_page: has_next.then(|| params.page + 1),
            prev_page: has_prev.then(|| params.page - 1),
        }
    }
}
