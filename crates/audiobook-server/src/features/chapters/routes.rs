//! Chapter API routes
//!
//! - `POST /api/v1/chapters` - Create a chapter for a book
//! - `GET /api/v1/chapters/:id` - Chapter with its audios
//! - `PUT /api/v1/chapters/:id` - Update title and/or text
//! - `DELETE /api/v1/chapters/:id` - Delete a chapter and its audios

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sqlx::PgPool;

use crate::api::response::{error_response, ApiResponse, ErrorKind};

use super::{
    commands::{
        CreateChapterCommand, CreateChapterError, DeleteChapterCommand, DeleteChapterError,
        UpdateChapterCommand, UpdateChapterError,
    },
    queries::{GetChapterError, GetChapterQuery},
};

pub fn chapters_routes() -> Router<PgPool> {
    Router::new()
        .route("/", post(create_chapter))
        .route(
            "/:id",
            get(get_chapter).put(update_chapter).delete(delete_chapter),
        )
}

/// `POST /api/v1/chapters`
///
/// - `201 Created` - `{ "id" }`
/// - `404 Not Found` - Unknown book
#[tracing::instrument(skip(pool, command), fields(book_id = command.book_id))]
async fn create_chapter(
    State(pool): State<PgPool>,
    Json(command): Json<CreateChapterCommand>,
) -> Result<Response, ChapterApiError> {
    let response = super::commands::create::handle(pool, command).await?;
    Ok(ApiResponse::success(response).with_status(StatusCode::CREATED))
}

#[tracing::instrument(skip(pool, command))]
async fn update_chapter(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateChapterCommand>,
) -> Result<Response, ChapterApiError> {
    command.id = id;

    let response = super::commands::update::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn delete_chapter(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Response, ChapterApiError> {
    let response = super::commands::delete::handle(pool, DeleteChapterCommand { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn get_chapter(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Response, ChapterApiError> {
    let response = super::queries::get::handle(pool, GetChapterQuery { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[derive(Debug, thiserror::Error)]
enum ChapterApiError {
    #[error(transparent)]
    Create(#[from] CreateChapterError),
    #[error(transparent)]
    Update(#[from] UpdateChapterError),
    #[error(transparent)]
    Delete(#[from] DeleteChapterError),
    #[error(transparent)]
    Get(#[from] GetChapterError),
}

impl ChapterApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Create(e) => e.kind(),
            Self::Update(e) => e.kind(),
            Self::Delete(e) => e.kind(),
            Self::Get(e) => e.kind(),
        }
    }
}

impl IntoResponse for ChapterApiError {
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
        chapters_routes().with_state(pool)
    }

    #[tokio::test]
    async fn test_update_without_fields_is_rejected() {
        let response = app()
            .oneshot(
                Request::put("/3")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_status_mapping() {
        let err = ChapterApiError::from(CreateChapterError::BookNotFound(5));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = ChapterApiError::from(DeleteChapterError::NotFound(5));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
