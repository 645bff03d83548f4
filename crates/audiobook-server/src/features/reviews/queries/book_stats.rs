use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::reviews::types::{book_exists, load_stats, ReviewStats};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookReviewStatsQuery {
    pub book_id: i64,
}

pub type BookReviewStatsResponse = ReviewStats;

#[derive(Debug, thiserror::Error)]
pub enum BookReviewStatsError {
    #[error("Book not found with id: {0}")]
    BookNotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BookReviewStatsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BookNotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<BookReviewStatsResponse, BookReviewStatsError>> for BookReviewStatsQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: BookReviewStatsQuery,
) -> Result<BookReviewStatsResponse, BookReviewStatsError> {
    if !book_exists(&pool, query.book_id).await? {
        return Err(BookReviewStatsError::BookNotFound(query.book_id));
    }

    Ok(load_stats(&pool, Some(query.book_id)).await?)
}
