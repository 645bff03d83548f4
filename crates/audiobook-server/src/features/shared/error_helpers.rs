//! Database error handling utilities
//!
//! Helpers for turning Postgres constraint violations into feature errors.
//!
//! # Examples
//!
//! ```rust,ignore
//! use audiobook_server::features::shared::error_helpers::map_unique_violation;
//!
//! sqlx::query("INSERT INTO categories (name) VALUES ($1)")
//!     .bind(&command.name)
//!     .execute(&pool)
//!     .await
//!     .map_err(|e| map_unique_violation(e, CreateCategoryError::Duplicate(name), Into::into))?;
//! ```

use sqlx::Error as SqlxError;

pub fn is_unique_violation(error: &SqlxError) -> bool {
    matches!(error, SqlxError::Database(db_err) if db_err.is_unique_violation())
}

pub fn is_foreign_key_violation(error: &SqlxError) -> bool {
    matches!(error, SqlxError::Database(db_err) if db_err.is_foreign_key_violation())
}

/// Name of the foreign key constraint `error` violated, if it is such a violation
pub fn violated_foreign_key(error: &SqlxError) -> Option<&str> {
    match error {
        SqlxError::Database(db_err) if db_err.is_foreign_key_violation() => db_err.constraint(),
        _ => None,
    }
}

/// Return `unique_error` on a unique violation, otherwise wrap the original error
pub fn map_unique_violation<E, F>(error: SqlxError, unique_error: E, default_wrapper: F) -> E
where
    F: FnOnce(SqlxError) -> E,
{
    if is_unique_violation(&error) {
        unique_error
    } else {
        default_wrapper(error)
    }
}

/// Return `fk_error` on a foreign key violation, otherwise wrap the original error
pub fn map_foreign_key_violation<E, F>(error: SqlxError, fk_error: E, default_wrapper: F) -> E
where
    F: FnOnce(SqlxError) -> E,
{
    if is_foreign_key_violation(&error) {
        fk_error
    } else {
        default_wrapper(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Duplicate,
        Missing,
        Database(String),
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        assert!(!is_unique_violation(&SqlxError::RowNotFound));
        assert!(!is_foreign_key_violation(&SqlxError::RowNotFound));

        let mapped = map_unique_violation(SqlxError::RowNotFound, TestError::Duplicate, |e| {
            TestError::Database(e.to_string())
        });
        assert!(matches!(mapped, TestError::Database(_)));

        let mapped = map_foreign_key_violation(SqlxError::PoolClosed, TestError::Missing, |e| {
            TestError::Database(e.to_string())
        });
        assert!(matches!(mapped, TestError::Database(_)));
    }

    #[test]
    fn test_violated_foreign_key_ignores_other_errors() {
        assert_eq!(violated_foreign_key(&SqlxError::RowNotFound), None);
        assert_eq!(violated_foreign_key(&SqlxError::PoolTimedOut), None);
    }
}
