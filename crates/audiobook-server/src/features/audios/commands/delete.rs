use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAudioCommand {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAudioResponse {
    pub id: i64,
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteAudioError {
    #[error("Audio not found with id: {0}")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DeleteAudioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<DeleteAudioResponse, DeleteAudioError>> for DeleteAudioCommand {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteAudioCommand,
) -> Result<DeleteAudioResponse, DeleteAudioError> {
    let result = sqlx::query("DELETE FROM audios WHERE id = $1")
        .bind(command.id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DeleteAudioError::NotFound(command.id));
    }

    tracing::info!(audio_id = command.id, "Audio deleted");

    Ok(DeleteAudioResponse {
        id: command.id,
        deleted: true,
    })
}

#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle(pool: PgPool) -> sqlx::Result<()> {
        let category = TestCategory::new("Fantasy").insert(&pool).await?;
        let book = TestBook::new(category, "The Hobbit").insert(&pool).await?;
        let chapter = TestChapter::new(book, "Chapter 1").insert(&pool).await?;
        let id = insert_audio(&pool, chapter, "a").await?;

        assert!(handle(pool.clone(), DeleteAudioCommand { id }).await.unwrap().deleted);
        assert!(matches!(
            handle(pool, DeleteAudioCommand { id }).await,
            Err(DeleteAudioError::NotFound(_))
        ));
        Ok(())
    }
}
