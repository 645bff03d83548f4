//! Featured books: best average rating first, then most reviewed

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::books::types::{BookSummary, BOOK_SUMMARY_COLUMNS, BOOK_SUMMARY_FROM};

pub const DEFAULT_FEATURED_LIMIT: i64 = 8;
pub const MAX_FEATURED_LIMIT: i64 = 50;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturedBooksQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

pub type FeaturedBooksResponse = Vec<BookSummary>;

#[derive(Debug, thiserror::Error)]
pub enum FeaturedBooksError {
    #[error("Limit must be between 1 and {}", MAX_FEATURED_LIMIT)]
    InvalidLimit,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl FeaturedBooksError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLimit => ErrorKind::Validation,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<FeaturedBooksResponse, FeaturedBooksError>> for FeaturedBooksQuery {}

impl FeaturedBooksQuery {
    pub fn validate(&self) -> Result<(), FeaturedBooksError> {
        if matches!(self.limit, Some(limit) if !(1..=MAX_FEATURED_LIMIT).contains(&limit)) {
            return Err(FeaturedBooksError::InvalidLimit);
        }
        Ok(())
    }

    fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_FEATURED_LIMIT)
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: FeaturedBooksQuery,
) -> Result<FeaturedBooksResponse, FeaturedBooksError> {
    query.validate()?;

    let books = sqlx::query_as::<_, BookSummary>(&format!(
        "{} {} ORDER BY rating DESC, review_count DESC, b.id LIMIT $1",
        BOOK_SUMMARY_COLUMNS, BOOK_SUMMARY_FROM
    ))
    .bind(query.limit())
    .fetch_all(&pool)
    .await?;

    Ok(books)
}
