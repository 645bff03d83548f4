use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::create::{AUDIO_FILE_MAX_LENGTH, AUDIO_NAME_MAX_LENGTH};
use crate::api::response::ErrorKind;
use crate::features::chapters::types::AudioItem;
use crate::features::shared::validation::{validate_optional, FieldValidationError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAudioCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
}

pub type UpdateAudioResponse = AudioItem;

#[derive(Debug, thiserror::Error)]
pub enum UpdateAudioError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),
    #[error("At least one field must be provided for update")]
    NoFieldsToUpdate,
    #[error("Audio not found with id: {0}")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UpdateAudioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::NoFieldsToUpdate => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<UpdateAudioResponse, UpdateAudioError>> for UpdateAudioCommand {}

impl UpdateAudioCommand {
    pub fn validate(&self) -> Result<(), UpdateAudioError> {
        if self.audio_name.is_none() && self.audio_file.is_none() {
            return Err(UpdateAudioError::NoFieldsToUpdate);
        }
        validate_optional(self.audio_name.as_deref(), "Audio name", AUDIO_NAME_MAX_LENGTH)?;
        validate_optional(self.audio_file.as_deref(), "Audio file", AUDIO_FILE_MAX_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(audio_id = command.id))]
pub async fn handle(
    pool: PgPool,
    command: UpdateAudioCommand,
) -> Result<UpdateAudioResponse, UpdateAudioError> {
    command.validate()?;

    sqlx::query_as::<_, AudioItem>(
        r#"
        UPDATE audios
        SET audio_name = COALESCE($2, audio_name),
            audio_file = COALESCE($3, audio_file)
        WHERE id = $1
        RETURNING id, chapter_id, audio_name, audio_file, created_at
        "#,
    )
    .bind(command.id)
    .bind(command.audio_name.as_deref().map(str::trim))
    .bind(command.audio_file.as_deref().map(str::trim))
    .fetch_optional(&pool)
    .await?
    .ok_or(UpdateAudioError::NotFound(command.id))
}
