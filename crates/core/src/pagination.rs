//! Page window arithmetic.

use crate::limits::{DEFAULT_PAGE, DEFAULT_ROWS_PER_PAGE, MAX_ROWS_PER_PAGE};

/// A requested page: 1-based page number and rows per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    rows_per_page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Creates a window; zero values fall back to the defaults and
    /// `rows_per_page` is capped at `MAX_ROWS_PER_PAGE`.
    pub fn new(page: u64, rows_per_page: u64) -> Self {
        let page = if page == 0 { DEFAULT_PAGE } else { page };
        let rows_per_page = match rows_per_page {
            0 => DEFAULT_ROWS_PER_PAGE,
            n => n.min(MAX_ROWS_PER_PAGE),
        };
        Self {
            page,
            rows_per_page,
        }
    }

    /// Parses raw query values leniently.
    ///
    /// Missing, non-numeric, zero or negative values use the defaults.
    pub fn from_query(page: Option<&str>, rows: Option<&str>) -> Self {
        Self::new(parse_positive(page), parse_positive(rows))
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn rows_per_page(&self) -> u64 {
        self.rows_per_page
    }

    /// Records to skip before this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.rows_per_page)
    }

    /// Records in a full page.
    pub fn limit(&self) -> u64 {
        self.rows_per_page
    }

    /// Number of pages needed for `total` records.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.rows_per_page)
    }

    /// Whether this page holds at least one of `total` records.
    pub fn is_within(&self, total: u64) -> bool {
        self.page <= self.total_pages(total)
    }
}

/// Returns 0 (meaning "use default") for anything that is not a positive integer.
fn parse_positive(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map(|n| n as u64)
        .unwrap_or(0)
}
