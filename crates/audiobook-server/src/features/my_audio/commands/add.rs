use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::my_audio::types::{MyAudioItem, AUDIO_NAME_MAX_LENGTH, AUDIO_URL_MAX_LENGTH};
use crate::features::shared::validation::{validate_required, FieldValidationError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMyAudioCommand {
    pub audio_name: String,
    pub audio_url: String,
    pub username: String,
}

pub type AddMyAudioResponse = MyAudioItem;

#[derive(Debug, thiserror::Error)]
pub enum AddMyAudioError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),
    #[error("User '{0}' not found")]
    UserNotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AddMyAudioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<AddMyAudioResponse, AddMyAudioError>> for AddMyAudioCommand {}

impl AddMyAudioCommand {
    pub fn validate(&self) -> Result<(), AddMyAudioError> {
        validate_required(&self.username, "Username", AUDIO_NAME_MAX_LENGTH)?;
        validate_required(&self.audio_name, "Audio name", AUDIO_NAME_MAX_LENGTH)?;
        validate_required(&self.audio_url, "Audio URL", AUDIO_URL_MAX_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
pub async fn handle(
    pool: PgPool,
    command: AddMyAudioCommand,
) -> Result<AddMyAudioResponse, AddMyAudioError> {
    command.validate()?;

    let item = sqlx::query_as::<_, MyAudioItem>(
        r#"
        INSERT INTO my_audio (user_id, audio_name, audio_url)
        SELECT u.id, $2, $3
        FROM users u
        WHERE u.username = $1
        RETURNING id, $1 AS username, audio_name, audio_url, created_at
        "#,
    )
    .bind(&command.username)
    .bind(command.audio_name.trim())
    .bind(command.audio_url.trim())
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AddMyAudioError::UserNotFound(command.username.clone()))?;

    tracing::info!(my_audio_id = item.id, "Saved audio added");

    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        let cmd = AddMyAudioCommand {
            audio_name: "Chapter 1 narration".to_string(),
            audio_url: "https://media.example.com/tts/1.mp3".to_string(),
            username: "bilbo".to_string(),
        };
        assert!(cmd.validate().is_ok());

        let no_url = AddMyAudioCommand {
            audio_url: String::new(),
            ..cmd
        };
        assert_eq!(no_url.validate().unwrap_err().kind(), ErrorKind::Validation);
    }
}
