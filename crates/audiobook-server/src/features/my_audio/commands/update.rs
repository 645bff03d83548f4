use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::my_audio::types::{MyAudioItem, AUDIO_NAME_MAX_LENGTH, AUDIO_URL_MAX_LENGTH};
use crate::features::shared::validation::{validate_optional, FieldValidationError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMyAudioCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

pub type UpdateMyAudioResponse = MyAudioItem;

#[derive(Debug, thiserror::Error)]
pub enum UpdateMyAudioError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),
    #[error("At least one field must be provided for update")]
    NoFieldsToUpdate,
    #[error("Saved audio not found with id: {0}")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UpdateMyAudioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::NoFieldsToUpdate => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<UpdateMyAudioResponse, UpdateMyAudioError>> for UpdateMyAudioCommand {}

impl UpdateMyAudioCommand {
    pub fn validate(&self) -> Result<(), UpdateMyAudioError> {
        if self.audio_name.is_none() && self.audio_url.is_none() {
            return Err(UpdateMyAudioError::NoFieldsToUpdate);
        }
        validate_optional(self.audio_name.as_deref(), "Audio name", AUDIO_NAME_MAX_LENGTH)?;
        validate_optional(self.audio_url.as_deref(), "Audio URL", AUDIO_URL_MAX_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(my_audio_id = command.id))]
pub async fn handle(
    pool: PgPool,
    command: UpdateMyAudioCommand,
) -> Result<UpdateMyAudioResponse, UpdateMyAudioError> {
    command.validate()?;

    sqlx::query_as::<_, MyAudioItem>(
        r#"
        UPDATE my_audio m
        SET audio_name = COALESCE($2, m.audio_name),
            audio_url = COALESCE($3, m.audio_url)
        FROM users u
        WHERE m.id = $1 AND u.id = m.user_id
        RETURNING m.id, u.username, m.audio_name, m.audio_url, m.created_at
        "#,
    )
    .bind(command.id)
    .bind(command.audio_name.as_deref().map(str::trim))
    .bind(command.audio_url.as_deref().map(str::trim))
    .fetch_optional(&pool)
    .await?
    .ok_or(UpdateMyAudioError::NotFound(command.id))
}


#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::features::my_audio::commands::add::{self, AddMyAudioCommand};
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_renames(pool: PgPool) -> sqlx::Result<()> {
        TestUser::new("bilbo").insert(&pool).await?;
        let item = add::handle(
            pool.clone(),
            AddMyAudioCommand {
                audio_name: "Draft".to_string(),
                audio_url: "https://media.example.com/tts/d.mp3".to_string(),
                username: "bilbo".to_string(),
            },
        )
        .await
        .unwrap();

        let updated = handle(
            pool,
            UpdateMyAudioCommand {
                id: item.id,
                audio_name: Some("Final".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.audio_name, "Final");
        assert_eq!(updated.audio_url, item.audio_url);
        assert_eq!(updated.username, "bilbo");
        Ok(())
    }
}
