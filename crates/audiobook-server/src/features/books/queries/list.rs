//! Book listing with filters
//!
//! Filters are optional and combine with AND. `keyword` matches title or
//! author case-insensitively; `min_rating` applies to the average review
//! rating, where unreviewed books count as 0.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::books::types::{BookSummary, BOOK_SUMMARY_COLUMNS, BOOK_SUMMARY_FROM};
use crate::features::shared::pagination::{Paginated, PaginationParams};

const BOOK_FILTERS: &str = r#"
    WHERE ($1::BIGINT IS NULL OR b.category_id = $1)
      AND ($2::FLOAT8 IS NULL OR COALESCE(s.rating, 0) >= $2)
      AND ($3::TEXT IS NULL OR LOWER(b.title) LIKE $3 OR LOWER(b.author) LIKE $3)
"#;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBooksQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

pub type ListBooksResponse = Paginated<BookSummary>;

#[derive(Debug, thiserror::Error)]
pub enum ListBooksError {
    #[error("{0}")]
    InvalidPagination(&'static str),
    #[error("Minimum rating must be between 0 and 5")]
    InvalidMinRating,
    #[error("Category id must be a positive id")]
    InvalidCategoryId,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ListBooksError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPagination(_) | Self::InvalidMinRating | Self::InvalidCategoryId => {
                ErrorKind::Validation
            },
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<ListBooksResponse, ListBooksError>> for ListBooksQuery {}

impl ListBooksQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.per_page)
    }

    pub fn validate(&self) -> Result<(), ListBooksError> {
        self.pagination()
            .validate()
            .map_err(ListBooksError::InvalidPagination)?;

        if let Some(min_rating) = self.min_rating {
            if !(0.0..=5.0).contains(&min_rating) {
                return Err(ListBooksError::InvalidMinRating);
            }
        }

        if matches!(self.category_id, Some(id) if id < 1) {
            return Err(ListBooksError::InvalidCategoryId);
        }

        Ok(())
    }

    /// Lower-cased `LIKE` pattern, or `None` for a blank keyword
    fn keyword_pattern(&self) -> Option<String> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| format!("%{}%", k.to_lowercase()))
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: ListBooksQuery) -> Result<ListBooksResponse, ListBooksError> {
    query.validate()?;

    let params = query.pagination();
    let keyword = query.keyword_pattern();

    let total: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) {} {}",
        BOOK_SUMMARY_FROM, BOOK_FILTERS
    ))
    .bind(query.category_id)
    .bind(query.min_rating)
    .bind(keyword.as_deref())
    .fetch_one(&pool)
    .await?;

    let items = sqlx::query_as::<_, BookSummary>(&format!(
        "{} {} {} ORDER BY b.id LIMIT $4 OFFSET $5",
        BOOK_SUMMARY_COLUMNS, BOOK_SUMMARY_FROM, BOOK_FILTERS
    ))
    .bind(query.category_id)
    .bind(query.min_rating)
    .bind(keyword.as_deref())
    .bind(params.per_page())
    .bind(params.offset())
    .fetch_all(&pool)
    .await?;

    tracing::debug!(count = items.len(), total, "Books listed");

    Ok(Paginated::from_items(items, &params, total))
}
