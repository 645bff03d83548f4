//! Update book command
//!
//! Fields left out of the request keep their stored value.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::books::types::{
    BookRecord, AUTHOR_MAX_LENGTH, PUBLISHED_MAX_LENGTH, TITLE_MAX_LENGTH,
};
use crate::features::shared::error_helpers::map_foreign_key_violation;
use crate::features::shared::validation::{validate_id, validate_optional, FieldValidationError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBookCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

pub type UpdateBookResponse = BookRecord;

#[derive(Debug, thiserror::Error)]
pub enum UpdateBookError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),
    #[error("At least one field must be provided for update")]
    NoFieldsToUpdate,
    #[error("Book not found with id: {0}")]
    NotFound(i64),
    #[error("Category not found with id: {0}")]
    CategoryNotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UpdateBookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::NoFieldsToUpdate => ErrorKind::Validation,
            Self::NotFound(_) | Self::CategoryNotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<UpdateBookResponse, UpdateBookError>> for UpdateBookCommand {}

impl UpdateBookCommand {
    pub fn validate(&self) -> Result<(), UpdateBookError> {
        if self.title.is_none()
            && self.author.is_none()
            && self.image.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.published.is_none()
        {
            return Err(UpdateBookError::NoFieldsToUpdate);
        }

        validate_optional(self.title.as_deref(), "Title", TITLE_MAX_LENGTH)?;
        validate_optional(self.author.as_deref(), "Author", AUTHOR_MAX_LENGTH)?;
        validate_optional(self.published.as_deref(), "Published", PUBLISHED_MAX_LENGTH)?;
        if let Some(category_id) = self.category_id {
            validate_id(category_id, "Category id")?;
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(book_id = command.id))]
pub async fn handle(
    pool: PgPool,
    command: UpdateBookCommand,
) -> Result<UpdateBookResponse, UpdateBookError> {
    command.validate()?;

    let book = sqlx::query_as::<_, BookRecord>(
        r#"
        UPDATE books
        SET title = COALESCE($2, title),
            author = COALESCE($3, author),
            image = COALESCE($4, image),
            description = COALESCE($5, description),
            category_id = COALESCE($6, category_id),
            published = COALESCE($7, published),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, title, author, image, description, published, category_id,
                  created_at, updated_at
        "#,
    )
    .bind(command.id)
    .bind(command.title.as_deref().map(str::trim))
    .bind(command.author.as_deref().map(str::trim))
    .bind(command.image.as_deref())
    .bind(command.description.as_deref())
    .bind(command.category_id)
    .bind(command.published.as_deref())
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        map_foreign_key_violation(
            e,
            UpdateBookError::CategoryNotFound(command.category_id.unwrap_or_default()),
            UpdateBookError::Database,
        )
    })?
    .ok_or(UpdateBookError::NotFound(command.id))?;

    tracing::info!("Book updated");

    Ok(book)
}
