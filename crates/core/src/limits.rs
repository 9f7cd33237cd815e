//! Size limits and defaults for the contact service.
//!
//! Per-field length caps live on the `#[validate]` attributes in `schema.rs`.

// === Pagination ===

/// Page used when `?page=` is missing or not a positive number.
pub const DEFAULT_PAGE: u64 = 1;

/// Rows per page used when `?row=` is missing or not a positive number.
pub const DEFAULT_ROWS_PER_PAGE: u64 = 5;

/// Upper bound on rows per page.
pub const MAX_ROWS_PER_PAGE: u64 = 100;

// === Request Body ===

/// Maximum accepted JSON body size in bytes (64KB).
pub const MAX_BODY_SIZE_BYTES: usize = 64 * 1024;

/// Maximum ids accepted by a single bulk delete.
pub const MAX_BULK_DELETE_IDS: usize = 1000;
