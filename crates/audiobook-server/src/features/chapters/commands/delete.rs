use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteChapterCommand {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteChapterResponse {
    pub id: i64,
    pub deleted: bool,
    pub audios_deleted: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteChapterError {
    #[error("Chapter not found with id: {0}")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DeleteChapterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

/// Deletes the chapter's audio rows, then the chapter
impl Request<Result<DeleteChapterResponse, DeleteChapterError>> for DeleteChapterCommand {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteChapterCommand,
) -> Result<DeleteChapterResponse, DeleteChapterError> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> =
        sqlx::query_scalar("SELECT id FROM chapters WHERE id = $1 FOR UPDATE")
            .bind(command.id)
            .fetch_optional(&mut *tx)
            .await?;

    if exists.is_none() {
        return Err(DeleteChapterError::NotFound(command.id));
    }

    let audios_deleted = sqlx::query("DELETE FROM audios WHERE chapter_id = $1")
        .bind(command.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM chapters WHERE id = $1")
        .bind(command.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(chapter_id = command.id, audios_deleted, "Chapter deleted");

    Ok(DeleteChapterResponse {
        id: command.id,
        deleted: true,
        audios_deleted,
    })
}

#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_deletes_audios_first(pool: PgPool) -> sqlx::Result<()> {
        let category = TestCategory::new("Fantasy").insert(&pool).await?;
        let book = TestBook::new(category, "The Hobbit").insert(&pool).await?;
        let id = TestChapter::new(book, "Chapter 1").insert(&pool).await?;
        insert_audio(&pool, id, "a").await?;
        insert_audio(&pool, id, "b").await?;

        let response = handle(pool.clone(), DeleteChapterCommand { id }).await.unwrap();
        assert_eq!(response.audios_deleted, 2);
        assert_eq!(count_rows(&pool, "chapters").await?, 0);
        assert_eq!(count_rows(&pool, "audios").await?, 0);

        assert!(matches!(
            handle(pool, DeleteChapterCommand { id }).await,
            Err(DeleteChapterError::NotFound(_))
        ));
        Ok(())
    }
}
