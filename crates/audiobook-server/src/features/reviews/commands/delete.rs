use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteReviewCommand {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteReviewResponse {
    pub id: i64,
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteReviewError {
    #[error("Review not found with id: {0}")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DeleteReviewError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<DeleteReviewResponse, DeleteReviewError>> for DeleteReviewCommand {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteReviewCommand,
) -> Result<DeleteReviewResponse, DeleteReviewError> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(command.id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DeleteReviewError::NotFound(command.id));
    }

    tracing::info!(review_id = command.id, "Review deleted");

    Ok(DeleteReviewResponse {
        id: command.id,
        deleted: true,
    })
}
