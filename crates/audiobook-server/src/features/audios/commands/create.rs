use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::chapters::types::AudioItem;
use crate::features::shared::error_helpers::map_foreign_key_violation;
use crate::features::shared::validation::{validate_id, validate_required, FieldValidationError};

pub const AUDIO_NAME_MAX_LENGTH: usize = 255;
pub const AUDIO_FILE_MAX_LENGTH: usize = 2048;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAudioCommand {
    pub chapter_id: i64,
    pub audio_name: String,
    /// Location of the media, usually the `url` returned by the upload endpoint
    pub audio_file: String,
}

pub type CreateAudioResponse = AudioItem;

#[derive(Debug, thiserror::Error)]
pub enum CreateAudioError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),
    #[error("Chapter not found with id: {0}")]
    ChapterNotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CreateAudioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::ChapterNotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<CreateAudioResponse, CreateAudioError>> for CreateAudioCommand {}

impl CreateAudioCommand {
    pub fn validate(&self) -> Result<(), CreateAudioError> {
        validate_id(self.chapter_id, "Chapter id")?;
        validate_required(&self.audio_name, "Audio name", AUDIO_NAME_MAX_LENGTH)?;
        validate_required(&self.audio_file, "Audio file", AUDIO_FILE_MAX_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(chapter_id = command.chapter_id))]
pub async fn handle(
    pool: PgPool,
    command: CreateAudioCommand,
) -> Result<CreateAudioResponse, CreateAudioError> {
    command.validate()?;

    let audio = sqlx::query_as::<_, AudioItem>(
        r#"
        INSERT INTO audios (chapter_id, audio_name, audio_file)
        VALUES ($1, $2, $3)
        RETURNING id, chapter_id, audio_name, audio_file, created_at
        "#,
    )
    .bind(command.chapter_id)
    .bind(command.audio_name.trim())
    .bind(command.audio_file.trim())
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        map_foreign_key_violation(
            e,
            CreateAudioError::ChapterNotFound(command.chapter_id),
            CreateAudioError::Database,
        )
    })?;

    tracing::info!(audio_id = audio.id, "Audio created");

    Ok(audio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        let cmd = CreateAudioCommand {
            chapter_id: 2,
            audio_name: "Narration".to_string(),
            audio_file: "https://media.example.com/uploads/a.mp3".to_string(),
        };
        assert!(cmd.validate().is_ok());

        let no_file = CreateAudioCommand {
            audio_file: "  ".to_string(),
            ..cmd
        };
        assert!(matches!(
            no_file.validate(),
            Err(CreateAudioError::Validation(FieldValidationError::Required { .. }))
        ));
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_creates_audio(pool: PgPool) -> sqlx::Result<()> {
        let category = TestCategory::new("Fantasy").insert(&pool).await?;
        let book = TestBook::new(category, "The Hobbit").insert(&pool).await?;
        let chapter = TestChapter::new(book, "Chapter 1").insert(&pool).await?;

        let audio = handle(
            pool.clone(),
            CreateAudioCommand {
                chapter_id: chapter,
                audio_name: "Narration".to_string(),
                audio_file: "https://media.example.com/n.mp3".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(audio.chapter_id, chapter);
        assert_eq!(count_rows(&pool, "audios").await?, 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_unknown_chapter(pool: PgPool) -> sqlx::Result<()> {
        let result = handle(
            pool,
            CreateAudioCommand {
                chapter_id: 404,
                audio_name: "Narration".to_string(),
                audio_file: "n.mp3".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(CreateAudioError::ChapterNotFound(404))));
        Ok(())
    }
}
