use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::reviews::types::{book_exists, ReviewItem, ReviewRow};
use crate::features::shared::pagination::{Paginated, PaginationParams};

pub const REVIEWS_PER_PAGE: i64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBookReviewsQuery {
    #[serde(skip)]
    pub book_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

pub type ListBookReviewsResponse = Paginated<ReviewItem>;

#[derive(Debug, thiserror::Error)]
pub enum ListBookReviewsError {
    #[error("{0}")]
    InvalidPagination(&'static str),
    #[error("Book not found with id: {0}")]
    BookNotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ListBookReviewsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPagination(_) => ErrorKind::Validation,
            Self::BookNotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<ListBookReviewsResponse, ListBookReviewsError>> for ListBookReviewsQuery {}

impl ListBookReviewsQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.per_page).with_default_per_page(REVIEWS_PER_PAGE)
    }

    pub fn validate(&self) -> Result<(), ListBookReviewsError> {
        self.pagination()
            .validate()
            .map_err(ListBookReviewsError::InvalidPagination)
    }
}

/// Reviews of one book, newest first
#[tracing::instrument(skip(pool), fields(book_id = query.book_id))]
pub async fn handle(
    pool: PgPool,
    query: ListBookReviewsQuery,
) -> Result<ListBookReviewsResponse, ListBookReviewsError> {
    query.validate()?;

    if !book_exists(&pool, query.book_id).await? {
        return Err(ListBookReviewsError::BookNotFound(query.book_id));
    }

    let params = query.pagination();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE book_id = $1")
        .bind(query.book_id)
        .fetch_one(&pool)
        .await?;

    let rows = sqlx::query_as::<_, ReviewRow>(
        r#"
        SELECT r.id, r.review, r.rating, r.created_at, u.username
        FROM reviews r
        JOIN users u ON u.id = r.user_id
        WHERE r.book_id = $1
        ORDER BY r.created_at DESC, r.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(query.book_id)
    .bind(params.per_page())
    .bind(params.offset())
    .fetch_all(&pool)
    .await?;

    let items = rows.into_iter().map(ReviewItem::from).collect();
    Ok(Paginated::from_items(items, &params, total))
}
