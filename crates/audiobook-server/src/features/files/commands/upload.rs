use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::api::response::ErrorKind;
use crate::storage::Storage;

pub const FILENAME_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFileCommand {
    pub filename: String,
    #[serde(skip)]
    pub content: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFileResponse {
    pub key: String,
    /// Public link, or a presigned GET URL when no public base URL is configured
    pub url: String,
    pub size: i64,
    pub checksum: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadFileError {
    #[error("Multipart body must contain a 'file' part")]
    FileRequired,
    #[error("Filename must not exceed 255 characters")]
    FilenameLength,
    #[error("Uploaded file is empty")]
    ContentRequired,
    #[error("Invalid multipart body: {0}")]
    Multipart(String),
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl UploadFileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileRequired
            | Self::FilenameLength
            | Self::ContentRequired
            | Self::Multipart(_) => ErrorKind::Validation,
            Self::Storage(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<UploadFileResponse, UploadFileError>> for UploadFileCommand {}

impl UploadFileCommand {
    pub fn validate(&self) -> Result<(), UploadFileError> {
        if self.filename.chars().count() > FILENAME_MAX_LENGTH {
            return Err(UploadFileError::FilenameLength);
        }
        if self.content.is_empty() {
            return Err(UploadFileError::ContentRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(
    skip(storage, command),
    fields(filename = %command.filename, size = command.content.len())
)]
pub async fn handle(
    storage: Storage,
    command: UploadFileCommand,
) -> Result<UploadFileResponse, UploadFileError> {
    command.validate()?;

    let key = storage.build_upload_key(&command.filename);

    let upload_result = storage
        .upload(&key, command.content, command.content_type)
        .await?;

    let url = storage.object_url(&upload_result.key).await?;

    Ok(UploadFileResponse {
        key: upload_result.key,
        url,
        size: upload_result.size,
        checksum: upload_result.checksum,
    })
}
