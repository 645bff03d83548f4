//! Update chapter command
//!
//! Only the provided fields change.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::create::CHAPTER_TITLE_MAX_LENGTH;
use crate::api::response::ErrorKind;
use crate::features::chapters::types::{attach_audios, ChapterDetail, ChapterRecord};
use crate::features::shared::validation::{validate_optional, FieldValidationError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateChapterCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

pub type UpdateChapterResponse = ChapterDetail;

#[derive(Debug, thiserror::Error)]
pub enum UpdateChapterError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),
    #[error("At least one field must be provided for update")]
    NoFieldsToUpdate,
    #[error("Chapter not found with id: {0}")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UpdateChapterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::NoFieldsToUpdate => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<UpdateChapterResponse, UpdateChapterError>> for UpdateChapterCommand {}

impl UpdateChapterCommand {
    pub fn validate(&self) -> Result<(), UpdateChapterError> {
        if self.chapter_title.is_none() && self.text.is_none() {
            return Err(UpdateChapterError::NoFieldsToUpdate);
        }
        validate_optional(
            self.chapter_title.as_deref(),
            "Chapter title",
            CHAPTER_TITLE_MAX_LENGTH,
        )?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(chapter_id = command.id))]
pub async fn handle(
    pool: PgPool,
    command: UpdateChapterCommand,
) -> Result<UpdateChapterResponse, UpdateChapterError> {
    command.validate()?;

    let record = sqlx::query_as::<_, ChapterRecord>(
        r#"
        UPDATE chapters
        SET title_chapter = COALESCE($2, title_chapter),
            text = COALESCE($3, text),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, book_id, title_chapter, text, created_at, updated_at
        "#,
    )
    .bind(command.id)
    .bind(command.chapter_title.as_deref().map(str::trim))
    .bind(command.text.as_deref())
    .fetch_optional(&pool)
    .await?
    .ok_or(UpdateChapterError::NotFound(command.id))?;

    let mut chapters = attach_audios(&pool, vec![record]).await?;
    chapters
        .pop()
        .ok_or(UpdateChapterError::NotFound(command.id))
}


#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_keeps_title_when_only_text_given(pool: PgPool) -> sqlx::Result<()> {
        let category = TestCategory::new("Fantasy").insert(&pool).await?;
        let book = TestBook::new(category, "The Hobbit").insert(&pool).await?;
        let id = TestChapter::new(book, "Roast Mutton").insert(&pool).await?;
        insert_audio(&pool, id, "mutton").await?;

        let chapter = handle(
            pool.clone(),
            UpdateChapterCommand {
                id,
                text: Some("Trolls".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(chapter.chapter_title, "Roast Mutton");
        assert_eq!(chapter.text, "Trolls");
        assert_eq!(chapter.audios.len(), 1);

        let missing = handle(
            pool,
            UpdateChapterCommand {
                id: id + 1,
                text: Some("x".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(missing, Err(UpdateChapterError::NotFound(_))));
        Ok(())
    }
}
