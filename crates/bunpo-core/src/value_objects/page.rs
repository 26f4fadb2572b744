//! Offset pagination parameters
//!
//! Page numbers start at 1. Page sizes are capped at [`MAX_PAGE_SIZE`].

/// Page used when none (or an invalid one) is requested
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when none (or one below 1) is requested
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Upper bound on the page size
pub const MAX_PAGE_SIZE: i64 = 10;

/// Validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a page request, clamping out-of-range values
    ///
    /// A page below 1 becomes 1. A page size below 1 falls back to the
    /// default, and one above the maximum is capped.
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = if page < 1 { DEFAULT_PAGE } else { page };
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size.min(MAX_PAGE_SIZE)
        };

        Self { page, page_size }
    }

    #[inline]
    pub fn page(&self) -> i64 {
        self.page
    }

    #[inline]
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// SQL `LIMIT`
    #[inline]
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// SQL `OFFSET`
    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Number of pages needed for `total_items` rows
    pub fn total_pages(&self, total_items: i64) -> i64 {
        if total_items <= 0 {
            return 0;
        }
        (total_items + self.page_size - 1) / self.page_size
    }
}
