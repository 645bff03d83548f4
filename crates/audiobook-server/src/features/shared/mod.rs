//! Shared utilities and types for feature modules
//!
//! # Contents
//!
//! - **pagination**: Common pagination types and helpers
//! - **validation**: Input validation utilities
//! - **error_helpers**: Database error handling utilities
//! - **test_helpers**: Database fixtures (test-only, `db-tests` feature)

pub mod error_helpers;
pub mod pagination;
pub mod validation;

#[cfg(all(test, feature = "db-tests"))]
pub mod test_helpers;

pub use pagination::{Paginated, PaginationMetadata, PaginationParams};
pub use validation::FieldValidationError;
