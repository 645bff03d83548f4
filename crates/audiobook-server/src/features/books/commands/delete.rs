use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBookCommand {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBookResponse {
    pub id: i64,
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteBookError {
    #[error("Book not found with id: {0}")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DeleteBookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

/// Removes reviews, chapter audios and chapters before the book itself
impl Request<Result<DeleteBookResponse, DeleteBookError>> for DeleteBookCommand {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteBookCommand,
) -> Result<DeleteBookResponse, DeleteBookError> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM books WHERE id = $1 FOR UPDATE")
        .bind(command.id)
        .fetch_optional(&mut *tx)
        .await?;

    if exists.is_none() {
        return Err(DeleteBookError::NotFound(command.id));
    }

    for statement in [
        "DELETE FROM reviews WHERE book_id = $1",
        "DELETE FROM audios WHERE chapter_id IN (SELECT id FROM chapters WHERE book_id = $1)",
        "DELETE FROM chapters WHERE book_id = $1",
        "DELETE FROM books WHERE id = $1",
    ] {
        sqlx::query(statement)
            .bind(command.id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(book_id = command.id, "Book deleted");

    Ok(DeleteBookResponse {
        id: command.id,
        deleted: true,
    })
}
