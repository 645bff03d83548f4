use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserCommand {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub username: String,
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteUserError {
    #[error("Username is required and cannot be empty")]
    UsernameRequired,
    #[error("User '{0}' not found")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DeleteUserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UsernameRequired => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<DeleteUserResponse, DeleteUserError>> for DeleteUserCommand {}

impl DeleteUserCommand {
    pub fn validate(&self) -> Result<(), DeleteUserError> {
        if self.username.is_empty() {
            return Err(DeleteUserError::UsernameRequired);
        }
        Ok(())
    }
}

/// Deletes the user's reviews, listening history and saved audio, then the user
#[tracing::instrument(skip(pool), fields(username = %command.username))]
pub async fn handle(
    pool: PgPool,
    command: DeleteUserCommand,
) -> Result<DeleteUserResponse, DeleteUserError> {
    command.validate()?;

    let mut tx = pool.begin().await?;

    let user_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE username = $1 FOR UPDATE")
        .bind(&command.username)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DeleteUserError::NotFound(command.username.clone()))?;

    for statement in [
        "DELETE FROM reviews WHERE user_id = $1",
        "DELETE FROM listen_history WHERE user_id = $1",
        "DELETE FROM my_audio WHERE user_id = $1",
        "DELETE FROM users WHERE id = $1",
    ] {
        sqlx::query(statement)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(user_id, "User deleted");

    Ok(DeleteUserResponse {
        username: command.username,
        deleted: true,
    })
}
