//! Review API routes
//!
//! Mounted in two places:
//!
//! - `GET /api/v1/books/:id/reviews` - Reviews of a book, newest first (`page`, `per_page`)
//! - `POST /api/v1/books/:id/reviews` - Add a review
//! - `GET /api/v1/books/:id/reviews/stats` - Rating statistics for a book
//! - `GET /api/v1/reviews/stats` - Rating statistics over all reviews
//! - `DELETE /api/v1/reviews/:id` - Delete a review
//!
//! The book-scoped routes use `:id` so they merge into the books router,
//! which already captures that segment under the same name.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use crate::api::response::{error_response, ApiResponse, ErrorKind};

use super::{
    commands::{AddReviewCommand, AddReviewError, DeleteReviewCommand, DeleteReviewError},
    queries::{
        BookReviewStatsError, BookReviewStatsQuery, ListBookReviewsError, ListBookReviewsQuery,
        ReviewStatsError,
    },
};

/// Routes nested under `/books`
pub fn book_reviews_routes() -> Router<PgPool> {
    Router::new()
        .route("/:id/reviews", get(list_book_reviews).post(add_review))
        .route("/:id/reviews/stats", get(book_review_stats))
}

/// Routes nested under `/reviews`
pub fn reviews_routes() -> Router<PgPool> {
    Router::new()
        .route("/stats", get(review_stats))
        .route("/:id", delete(delete_review))
}

/// `POST /api/v1/books/:id/reviews`
///
/// - `201 Created` - Review added
/// - `400 Bad Request` - Rating outside 1..=5
/// - `404 Not Found` - Unknown user or book
#[tracing::instrument(skip(pool, command))]
async fn add_review(
    State(pool): State<PgPool>,
    Path(book_id): Path<i64>,
    Json(mut command): Json<AddReviewCommand>,
) -> Result<Response, ReviewApiError> {
    command.book_id = book_id;

    let response = super::commands::add::handle(pool, command).await?;
    Ok(ApiResponse::success(response).with_status(StatusCode::CREATED))
}

#[tracing::instrument(skip(pool))]
async fn delete_review(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Response, ReviewApiError> {
    let response = super::commands::delete::handle(pool, DeleteReviewCommand { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool, query), fields(page = ?query.page, per_page = ?query.per_page))]
async fn list_book_reviews(
    State(pool): State<PgPool>,
    Path(book_id): Path<i64>,
    Query(mut query): Query<ListBookReviewsQuery>,
) -> Result<Response, ReviewApiError> {
    query.book_id = book_id;

    let response = super::queries::list_for_book::handle(pool, query).await?;

    let meta = json!({
        "pagination": response.pagination
    });

    Ok(ApiResponse::success_with_meta(response.items, meta).into_response())
}

#[tracing::instrument(skip(pool))]
async fn book_review_stats(
    State(pool): State<PgPool>,
    Path(book_id): Path<i64>,
) -> Result<Response, ReviewApiError> {
    let response =
        super::queries::book_stats::handle(pool, BookReviewStatsQuery { book_id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn review_stats(State(pool): State<PgPool>) -> Result<Response, ReviewApiError> {
    let response = super::queries::stats::handle(pool).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[derive(Debug, thiserror::Error)]
enum ReviewApiError {
    #[error(transparent)]
    Add(#[from] AddReviewError),
    #[error(transparent)]
    Delete(#[from] DeleteReviewError),
    #[error(transparent)]
    List(#[from] ListBookReviewsError),
    #[error(transparent)]
    BookStats(#[from] BookReviewStatsError),
    #[error(transparent)]
    Stats(#[from] ReviewStatsError),
}

impl ReviewApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Add(e) => e.kind(),
            Self::Delete(e) => e.kind(),
            Self::List(e) => e.kind(),
            Self::BookStats(e) => e.kind(),
            Self::Stats(e) => e.kind(),
        }
    }
}

impl IntoResponse for ReviewApiError {
    fn into_response(self) -> Response {
        error_response(self.kind(), &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/audiobook_unreachable")
            .unwrap();
        book_reviews_routes().with_state(pool)
    }

    #[tokio::test]
    async fn test_add_rejects_out_of_range_rating() {
        let body = serde_json::json!({ "username": "bilbo", "rating": 7, "review": "!" });
        let response = app()
            .oneshot(
                Request::post("/3/reviews")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_rejects_oversized_page() {
        let response = app()
            .oneshot(
                Request::get("/3/reviews?per_page=1000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_status_mapping() {
        let err = ReviewApiError::from(AddReviewError::UserNotFound("smaug".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
