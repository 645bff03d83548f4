//! Saved audio API routes
//!
//! - `POST /api/v1/my-audio` - Save an audio clip for a user
//! - `GET /api/v1/my-audio/:username` - A user's saved clips
//! - `PUT /api/v1/my-audio/:id` - Rename or repoint a clip
//! - `DELETE /api/v1/my-audio/:id` - Remove a clip
//!
//! The router needs one parameter name per segment, so all three share
//! `/:key`; each handler extracts it with its own type.

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
        AddMyAudioCommand, AddMyAudioError, DeleteMyAudioCommand, DeleteMyAudioError,
        UpdateMyAudioCommand, UpdateMyAudioError,
    },
    queries::{ListMyAudioError, ListMyAudioQuery},
};

pub fn my_audio_routes() -> Router<PgPool> {
    Router::new()
        .route("/", post(add_my_audio))
        .route(
            "/:key",
            get(list_my_audio).put(update_my_audio).delete(delete_my_audio),
        )
}

#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
async fn add_my_audio(
    State(pool): State<PgPool>,
    Json(command): Json<AddMyAudioCommand>,
) -> Result<Response, MyAudioApiError> {
    let response = super::commands::add::handle(pool, command).await?;
    Ok(ApiResponse::success(response).with_status(StatusCode::CREATED))
}

#[tracing::instrument(skip(pool, command))]
async fn update_my_audio(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateMyAudioCommand>,
) -> Result<Response, MyAudioApiError> {
    command.id = id;

    let response = super::commands::update::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn delete_my_audio(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Response, MyAudioApiError> {
    let response = super::commands::delete::handle(pool, DeleteMyAudioCommand { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool), fields(username = %username))]
async fn list_my_audio(
    State(pool): State<PgPool>,
    Path(username): Path<String>,
) -> Result<Response, MyAudioApiError> {
    let response = super::queries::list_for_user::handle(pool, ListMyAudioQuery { username }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[derive(Debug, thiserror::Error)]
enum MyAudioApiError {
    #[error(transparent)]
    Add(#[from] AddMyAudioError),
    #[error(transparent)]
    Update(#[from] UpdateMyAudioError),
    #[error(transparent)]
    Delete(#[from] DeleteMyAudioError),
    #[error(transparent)]
    List(#[from] ListMyAudioError),
}

impl MyAudioApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Add(e) => e.kind(),
            Self::Update(e) => e.kind(),
            Self::Delete(e) => e.kind(),
            Self::List(e) => e.kind(),
        }
    }
}

impl IntoResponse for MyAudioApiError {
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
        my_audio_routes().with_state(pool)
    }

    #[tokio::test]
    async fn test_update_requires_numeric_id() {
        let response = app()
            .oneshot(
                Request::put("/bilbo")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"audio_name":"x"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_without_fields_is_rejected() {
        let response = app()
            .oneshot(
                Request::put("/4")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
