use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::create::CATEGORY_NAME_MAX_LENGTH;
use crate::api::response::ErrorKind;
use crate::features::shared::error_helpers::map_unique_violation;
use crate::features::shared::validation::{validate_required, FieldValidationError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCategoryCommand {
    #[serde(skip)]
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UpdateCategoryResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateCategoryError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),
    #[error("Category with id {0} not found")]
    NotFound(i64),
    #[error("Category '{0}' already exists")]
    Duplicate(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UpdateCategoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Duplicate(_) => ErrorKind::Conflict,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<UpdateCategoryResponse, UpdateCategoryError>> for UpdateCategoryCommand {}

impl UpdateCategoryCommand {
    pub fn validate(&self) -> Result<(), UpdateCategoryError> {
        validate_required(&self.name, "Category name", CATEGORY_NAME_MAX_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(category_id = command.id))]
pub async fn handle(
    pool: PgPool,
    command: UpdateCategoryCommand,
) -> Result<UpdateCategoryResponse, UpdateCategoryError> {
    command.validate()?;

    let name = command.name.trim();

    sqlx::query_as::<_, UpdateCategoryResponse>(
        "UPDATE categories SET name = $2 WHERE id = $1 RETURNING id, name",
    )
    .bind(command.id)
    .bind(name)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        map_unique_violation(
            e,
            UpdateCategoryError::Duplicate(name.to_string()),
            UpdateCategoryError::Database,
        )
    })?
    .ok_or(UpdateCategoryError::NotFound(command.id))
}
