//! Category API routes
//!
//! - `GET /api/v1/categories` - List categories with book counts
//! - `POST /api/v1/categories` - Create a category
//! - `PUT /api/v1/categories/:id` - Rename a category
//! - `DELETE /api/v1/categories/:id` - Delete an empty category

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use sqlx::PgPool;

use crate::api::response::{error_response, ApiResponse, ErrorKind};

use super::{
    commands::{
        CreateCategoryCommand, CreateCategoryError, DeleteCategoryCommand, DeleteCategoryError,
        UpdateCategoryCommand, UpdateCategoryError,
    },
    queries::ListCategoriesError,
};

pub fn categories_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/:id", put(update_category).delete(delete_category))
}

#[tracing::instrument(skip(pool, command), fields(name = %command.name))]
async fn create_category(
    State(pool): State<PgPool>,
    Json(command): Json<CreateCategoryCommand>,
) -> Result<Response, CategoryApiError> {
    let response = super::commands::create::handle(pool, command).await?;
    Ok(ApiResponse::success(response).with_status(StatusCode::CREATED))
}

#[tracing::instrument(skip(pool, command))]
async fn update_category(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateCategoryCommand>,
) -> Result<Response, CategoryApiError> {
    command.id = id;

    let response = super::commands::update::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

/// `DELETE /api/v1/categories/:id`
///
/// - `409 Conflict` - Books still reference the category
#[tracing::instrument(skip(pool))]
async fn delete_category(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Response, CategoryApiError> {
    let response = super::commands::delete::handle(pool, DeleteCategoryCommand { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn list_categories(State(pool): State<PgPool>) -> Result<Response, CategoryApiError> {
    let response = super::queries::list::handle(pool).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[derive(Debug, thiserror::Error)]
enum CategoryApiError {
    #[error(transparent)]
    Create(#[from] CreateCategoryError),
    #[error(transparent)]
    Update(#[from] UpdateCategoryError),
    #[error(transparent)]
    Delete(#[from] DeleteCategoryError),
    #[error(transparent)]
    List(#[from] ListCategoriesError),
}

impl CategoryApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Create(e) => e.kind(),
            Self::Update(e) => e.kind(),
            Self::Delete(e) => e.kind(),
            Self::List(e) => e.kind(),
        }
    }
}

impl IntoResponse for CategoryApiError {
    fn into_response(self) -> Response {
        error_response(self.kind(), &self)
    }
}
