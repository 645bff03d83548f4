use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::shared::validation::{validate_id, validate_required, FieldValidationError};

pub const CHAPTER_TITLE_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChapterCommand {
    pub book_id: i64,
    pub chapter_title: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChapterResponse {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateChapterError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),
    #[error("Book not found with id: {0}")]
    BookNotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CreateChapterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::BookNotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<CreateChapterResponse, CreateChapterError>> for CreateChapterCommand {}

impl CreateChapterCommand {
    pub fn validate(&self) -> Result<(), CreateChapterError> {
        validate_id(self.book_id, "Book id")?;
        validate_required(&self.chapter_title, "Chapter title", CHAPTER_TITLE_MAX_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(book_id = command.book_id))]
pub async fn handle(
    pool: PgPool,
    command: CreateChapterCommand,
) -> Result<CreateChapterResponse, CreateChapterError> {
    command.validate()?;

    let mut tx = pool.begin().await?;

    let book: Option<i64> = sqlx::query_scalar("SELECT id FROM books WHERE id = $1 FOR SHARE")
        .bind(command.book_id)
        .fetch_optional(&mut *tx)
        .await?;

    if book.is_none() {
        return Err(CreateChapterError::BookNotFound(command.book_id));
    }

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO chapters (book_id, title_chapter, text)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(command.book_id)
    .bind(command.chapter_title.trim())
    .bind(command.text.as_deref().unwrap_or_default())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(chapter_id = id, "Chapter created");

    Ok(CreateChapterResponse { id })
}
