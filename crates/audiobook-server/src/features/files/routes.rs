//! File upload routes
//!
//! - `POST /api/v1/files` - multipart body with a `file` part

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};

use crate::api::response::{error_response, ApiResponse, ErrorKind};
use crate::storage::Storage;

use super::commands::{UploadFileCommand, UploadFileError};

/// Largest accepted request body
pub const MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

pub fn files_routes() -> Router<Storage> {
    Router::new()
        .route("/", post(upload_file))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// `POST /api/v1/files`
///
/// - `201 Created` - `{ "key", "url", "size", "checksum" }`
/// - `400 Bad Request` - Missing or empty `file` part
#[tracing::instrument(skip(storage, multipart))]
async fn upload_file(
    State(storage): State<Storage>,
    mut multipart: Multipart,
) -> Result<Response, FileApiError> {
    let mut command: Option<UploadFileCommand> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadFileError::Multipart(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| UploadFileError::Multipart(e.to_string()))?;

        command = Some(UploadFileCommand {
            filename,
            content: data.to_vec(),
            content_type,
        });
    }

    let command = command.ok_or(UploadFileError::FileRequired)?;

    let response = super::commands::upload::handle(storage, command).await?;

    tracing::info!(
        key = %response.key,
        size = response.size,
        checksum = %response.checksum,
        "File uploaded"
    );

    Ok(ApiResponse::success(response).with_status(StatusCode::CREATED))
}

#[derive(Debug, thiserror::Error)]
enum FileApiError {
    #[error(transparent)]
    Upload(#[from] UploadFileError),
}

impl FileApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Upload(e) => e.kind(),
        }
    }
}

impl IntoResponse for FileApiError {
    fn into_response(self) -> Response {
        error_response(self.kind(), &self)
    }
}
