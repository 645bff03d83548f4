//! Change password command
//!
//! The old password must verify before the new hash is written.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::shared::validation::{validate_password, FieldValidationError};
use crate::features::users::password::{hash_password, verify_password, PasswordHashError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordCommand {
    #[serde(skip)]
    pub username: String,
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordResponse {
    pub username: String,
    pub changed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),

    #[error("Old password is incorrect")]
    WrongPassword,

    #[error("User '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Password(#[from] PasswordHashError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ChangePasswordError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::WrongPassword => ErrorKind::Unauthorized,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Password(_) | Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<ChangePasswordResponse, ChangePasswordError>> for ChangePasswordCommand {}

impl ChangePasswordCommand {
    pub fn validate(&self) -> Result<(), ChangePasswordError> {
        if self.old_password.is_empty() {
            return Err(FieldValidationError::Required {
                field: "Old password",
            }
            .into());
        }
        validate_password(&self.new_password)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
pub async fn handle(
    pool: PgPool,
    command: ChangePasswordCommand,
) -> Result<ChangePasswordResponse, ChangePasswordError> {
    command.validate()?;

    let stored_hash: String =
        sqlx::query_scalar("SELECT password_hash FROM users WHERE username = $1")
            .bind(&command.username)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| ChangePasswordError::NotFound(command.username.clone()))?;

    if !verify_password(&command.old_password, Some(&stored_hash)).await {
        tracing::warn!("Password change rejected: old password mismatch");
        return Err(ChangePasswordError::WrongPassword);
    }

    let new_hash = hash_password(&command.new_password).await?;

    sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE username = $1")
        .bind(&command.username)
        .bind(new_hash)
        .execute(&pool)
        .await?;

    tracing::info!("Password changed");

    Ok(ChangePasswordResponse {
        username: command.username,
        changed: true,
    })
}
