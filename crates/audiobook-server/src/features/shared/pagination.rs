//! Shared pagination utilities
//!
//! Provides common pagination types and helpers used across list queries.
//!
//! # Examples
//!
//! ```rust,ignore
//! use audiobook_server::features::shared::pagination::{PaginationParams, PaginationMetadata};
//!
//! let params = PaginationParams::new(Some(2), None).with_default_per_page(10);
//! let offset = params.offset();
//!
//! // After fetching data...
//! let metadata = PaginationMetadata::from_params(&params, 42);
//! ```

use serde::{Deserialize, Serialize};

/// Items per page when the caller and the list give no other value
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Upper bound accepted for `per_page`
pub const MAX_PER_PAGE: i64 = 100;

/// Upper bound accepted for `page`; keeps the SQL offset within `i64`
pub const MAX_PAGE: i64 = i64::MAX / MAX_PER_PAGE;

/// Common pagination request parameters
///
/// Used in list queries to specify page and items per page.
/// Pages are 1-indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed). Defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,

    /// Items per page, clamped to 1-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,

    #[serde(skip, default = "default_per_page")]
    default_per_page: i64,
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl PaginationParams {
    /// Create new pagination parameters
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page,
            per_page,
            default_per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Override the page size used when `per_page` is absent
    pub fn with_default_per_page(mut self, default_per_page: i64) -> Self {
        self.default_per_page = default_per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    /// Get the page number (1-indexed), defaulting to 1
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).clamp(1, MAX_PAGE)
    }

    /// Get items per page, clamped to 1-100
    pub fn per_page(&self) -> i64 {
        self.per_page
            .unwrap_or(self.default_per_page)
            .clamp(1, MAX_PER_PAGE)
    }

    /// Calculate the offset for SQL OFFSET clause
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.per_page())
    }

    /// Validate pagination parameters
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(page) = self.page {
            if page < 1 {
                return Err("Page must be greater than 0");
            }
            if page > MAX_PAGE {
                return Err("Page is too large");
            }
        }
        if let Some(per_page) = self.per_page {
            if !(1..=MAX_PER_PAGE).contains(&per_page) {
                return Err("Per page must be between 1 and 100");
            }
        }
        Ok(())
    }
}

/// Pagination metadata for response
///
/// Contains information about the current page and total results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationMetadata {
    /// Current page number (1-indexed)
    pub page: i64,

    /// Items per page
    pub per_page: i64,

    /// Total number of items
    pub total: i64,

    /// Total number of pages
    pub pages: i64,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMetadata {
    /// Create new pagination metadata from query results
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };

        Self {
            page,
            per_page,
            total,
            pages,
            has_next: page < pages,
            has_prev: page > 1,
        }
    }

    /// Create pagination metadata from params and total count
    pub fn from_params(params: &PaginationParams, total: i64) -> Self {
        Self::new(params.page(), params.per_page(), total)
    }
}

/// Wrapper for paginated list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// List of items for the current page
    pub items: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMetadata,
}

impl<T> Paginated<T> {
    /// Create a paginated response from items, params, and total count
    pub fn from_items(items: Vec<T>, params: &PaginationParams, total: i64) -> Self {
        Self {
            items,
            pagination: PaginationMetadata::from_params(params, total),
        }
    }
}
