use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::shared::error_helpers::map_unique_violation;
use crate::features::shared::validation::{validate_required, FieldValidationError};

pub const CATEGORY_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryCommand {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CreateCategoryResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateCategoryError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),
    #[error("Category '{0}' already exists")]
    Duplicate(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CreateCategoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Duplicate(_) => ErrorKind::Conflict,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<CreateCategoryResponse, CreateCategoryError>> for CreateCategoryCommand {}

impl CreateCategoryCommand {
    pub fn validate(&self) -> Result<(), CreateCategoryError> {
        validate_required(&self.name, "Category name", CATEGORY_NAME_MAX_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(name = %command.name))]
pub async fn handle(
    pool: PgPool,
    command: CreateCategoryCommand,
) -> Result<CreateCategoryResponse, CreateCategoryError> {
    command.validate()?;

    let name = command.name.trim();

    let category = sqlx::query_as::<_, CreateCategoryResponse>(
        "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
    )
    .bind(name)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        map_unique_violation(
            e,
            CreateCategoryError::Duplicate(name.to_string()),
            CreateCategoryError::Database,
        )
    })?;

    tracing::info!(category_id = category.id, "Category created");

    Ok(category)
}
