use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::books::types::{
    BookRecord, AUTHOR_MAX_LENGTH, PUBLISHED_MAX_LENGTH, TITLE_MAX_LENGTH,
};
use crate::features::shared::error_helpers::map_foreign_key_violation;
use crate::features::shared::validation::{
    validate_id, validate_optional, validate_required, FieldValidationError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookCommand {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub category_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

pub type CreateBookResponse = BookRecord;

#[derive(Debug, thiserror::Error)]
pub enum CreateBookError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),
    #[error("Category not found with id: {0}")]
    CategoryNotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CreateBookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::CategoryNotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<CreateBookResponse, CreateBookError>> for CreateBookCommand {}

impl CreateBookCommand {
    pub fn validate(&self) -> Result<(), CreateBookError> {
        validate_required(&self.title, "Title", TITLE_MAX_LENGTH)?;
        validate_required(&self.author, "Author", AUTHOR_MAX_LENGTH)?;
        validate_id(self.category_id, "Category id")?;
        validate_optional(self.published.as_deref(), "Published", PUBLISHED_MAX_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(
    skip(pool, command),
    fields(title = %command.title, category_id = command.category_id)
)]
pub async fn handle(
    pool: PgPool,
    command: CreateBookCommand,
) -> Result<CreateBookResponse, CreateBookError> {
    command.validate()?;

    let book = sqlx::query_as::<_, BookRecord>(
        r#"
        INSERT INTO books (title, author, image, description, published, category_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, author, image, description, published, category_id,
                  created_at, updated_at
        "#,
    )
    .bind(command.title.trim())
    .bind(command.author.trim())
    .bind(&command.image)
    .bind(&command.description)
    .bind(command.published.as_deref())
    .bind(command.category_id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        map_foreign_key_violation(
            e,
            CreateBookError::CategoryNotFound(command.category_id),
            CreateBookError::Database,
        )
    })?;

    tracing::info!(book_id = book.id, "Book created");

    Ok(book)
}


#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::features::shared::test_helpers::TestCategory;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_creates_book(pool: PgPool) -> sqlx::Result<()> {
        let category_id = TestCategory::new("Fantasy").insert(&pool).await?;

        let cmd = CreateBookCommand {
            title: "The Hobbit".to_string(),
            author: "J. R. R. Tolkien".to_string(),
            image: String::new(),
            description: String::new(),
            category_id,
            published: Some("1937".to_string()),
        };
        let book = handle(pool, cmd).await.unwrap();
        assert_eq!(book.category_id, category_id);
        assert_eq!(book.published.as_deref(), Some("1937"));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_unknown_category(pool: PgPool) -> sqlx::Result<()> {
        let cmd = CreateBookCommand {
            title: "Orphan".to_string(),
            author: "Nobody".to_string(),
            image: String::new(),
            description: String::new(),
            category_id: 404,
            published: None,
        };
        assert!(matches!(
            handle(pool, cmd).await,
            Err(CreateBookError::CategoryNotFound(404))
        ));
        Ok(())
    }
}
