//! Audio API routes
//!
//! - `POST /api/v1/audios` - Attach an audio file to a chapter
//! - `PUT /api/v1/audios/:id` - Rename or repoint an audio
//! - `DELETE /api/v1/audios/:id` - Remove an audio

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
    Json, Router,
};
use sqlx::PgPool;

use crate::api::response::{error_response, ApiResponse, ErrorKind};

use super::commands::{
    CreateAudioCommand, CreateAudioError, DeleteAudioCommand, DeleteAudioError,
    UpdateAudioCommand, UpdateAudioError,
};

pub fn audios_routes() -> Router<PgPool> {
    Router::new()
        .route("/", post(create_audio))
        .route("/:id", put(update_audio).delete(delete_audio))
}

#[tracing::instrument(skip(pool, command), fields(chapter_id = command.chapter_id))]
async fn create_audio(
    State(pool): State<PgPool>,
    Json(command): Json<CreateAudioCommand>,
) -> Result<Response, AudioApiError> {
    let response = super::commands::create::handle(pool, command).await?;
    Ok(ApiResponse::success(response).with_status(StatusCode::CREATED))
}

#[tracing::instrument(skip(pool, command))]
async fn update_audio(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateAudioCommand>,
) -> Result<Response, AudioApiError> {
    command.id = id;

    let response = super::commands::update::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn delete_audio(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Response, AudioApiError> {
    let response = super::commands::delete::handle(pool, DeleteAudioCommand { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[derive(Debug, thiserror::Error)]
enum AudioApiError {
    #[error(transparent)]
    Create(#[from] CreateAudioError),
    #[error(transparent)]
    Update(#[from] UpdateAudioError),
    #[error(transparent)]
    Delete(#[from] DeleteAudioError),
}

impl AudioApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Create(e) => e.kind(),
            Self::Update(e) => e.kind(),
            Self::Delete(e) => e.kind(),
        }
    }
}

impl IntoResponse for AudioApiError {
    fn into_response(self) -> Response {
        error_response(self.kind(), &self)
    }
}
