use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteMyAudioCommand {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteMyAudioResponse {
    pub id: i64,
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteMyAudioError {
    #[error("Saved audio not found with id: {0}")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DeleteMyAudioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<DeleteMyAudioResponse, DeleteMyAudioError>> for DeleteMyAudioCommand {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteMyAudioCommand,
) -> Result<DeleteMyAudioResponse, DeleteMyAudioError> {
    let result = sqlx::query("DELETE FROM my_audio WHERE id = $1")
        .bind(command.id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DeleteMyAudioError::NotFound(command.id));
    }

    Ok(DeleteMyAudioResponse {
        id: command.id,
        deleted: true,
    })
}
