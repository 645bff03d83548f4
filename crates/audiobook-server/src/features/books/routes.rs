//! Book API routes
//!
//! # Route Structure
//!
//! - `GET /api/v1/books` - List books (`category_id`, `min_rating`, `keyword`, `page`, `per_page`)
//! - `GET /api/v1/books/featured` - Top rated books (`limit`)
//! - `GET /api/v1/books/:id` - Book with chapters and audios
//! - `POST /api/v1/books` - Create a book
//! - `PUT /api/v1/books/:id` - Update a book
//! - `DELETE /api/v1/books/:id` - Delete a book with its chapters, audios and reviews
//!
//! Review routes under `/books/:id/reviews` live in the reviews feature and
//! are merged into this router by [`crate::features::router`].

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use crate::api::response::{error_response, ApiResponse, ErrorKind};

use super::{
    commands::{
        CreateBookCommand, CreateBookError, DeleteBookCommand, DeleteBookError, UpdateBookCommand,
        UpdateBookError,
    },
    queries::{
        FeaturedBooksError, FeaturedBooksQuery, GetBookError, GetBookQuery, ListBooksError,
        ListBooksQuery,
    },
};

pub fn books_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/featured", get(featured_books))
        .route("/:id", get(get_book).put(update_book).delete(delete_book))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// `POST /api/v1/books`
///
/// - `201 Created` - Book created
/// - `400 Bad Request` - Validation error
/// - `404 Not Found` - Unknown category
#[tracing::instrument(skip(pool, command), fields(title = %command.title))]
async fn create_book(
    State(pool): State<PgPool>,
    Json(command): Json<CreateBookCommand>,
) -> Result<Response, BookApiError> {
    let response = super::commands::create::handle(pool, command).await?;
    Ok(ApiResponse::success(response).with_status(StatusCode::CREATED))
}

#[tracing::instrument(skip(pool, command))]
async fn update_book(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateBookCommand>,
) -> Result<Response, BookApiError> {
    command.id = id;

    let response = super::commands::update::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn delete_book(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Response, BookApiError> {
    let response = super::commands::delete::handle(pool, DeleteBookCommand { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

#[tracing::instrument(
    skip(pool, query),
    fields(page = ?query.page, per_page = ?query.per_page, category_id = ?query.category_id)
)]
async fn list_books(
    State(pool): State<PgPool>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Response, BookApiError> {
    let response = super::queries::list::handle(pool, query).await?;

    let meta = json!({
        "pagination": response.pagination
    });

    Ok(ApiResponse::success_with_meta(response.items, meta).into_response())
}

#[tracing::instrument(skip(pool))]
async fn featured_books(
    State(pool): State<PgPool>,
    Query(query): Query<FeaturedBooksQuery>,
) -> Result<Response, BookApiError> {
    let response = super::queries::featured::handle(pool, query).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn get_book(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Response, BookApiError> {
    let response = super::queries::get::handle(pool, GetBookQuery { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
enum BookApiError {
    #[error(transparent)]
    Create(#[from] CreateBookError),
    #[error(transparent)]
    Update(#[from] UpdateBookError),
    #[error(transparent)]
    Delete(#[from] DeleteBookError),
    #[error(transparent)]
    List(#[from] ListBooksError),
    #[error(transparent)]
    Featured(#[from] FeaturedBooksError),
    #[error(transparent)]
    Get(#[from] GetBookError),
}

impl BookApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Create(e) => e.kind(),
            Self::Update(e) => e.kind(),
            Self::Delete(e) => e.kind(),
            Self::List(e) => e.kind(),
            Self::Featured(e) => e.kind(),
            Self::Get(e) => e.kind(),
        }
    }
}

impl IntoResponse for BookApiError {
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
        books_routes().with_state(pool)
    }

    #[tokio::test]
    async fn test_list_rejects_out_of_range_rating() {
        let response = app()
            .oneshot(Request::get("/?min_rating=9").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_rejects_huge_page() {
        let response = app()
            .oneshot(
                Request::get("/?page=9223372036854775807")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_featured_rejects_large_limit() {
        let response = app()
            .oneshot(Request::get("/featured?limit=500").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_validation_error() {
        let body = serde_json::json!({ "title": "", "author": "Anon", "category_id": 1 });
        let response = app()
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_status_mapping() {
        let err = BookApiError::from(CreateBookError::CategoryNotFound(3));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
