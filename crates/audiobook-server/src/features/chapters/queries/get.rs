use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::chapters::types::{attach_audios, ChapterDetail, ChapterRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetChapterQuery {
    pub id: i64,
}

pub type GetChapterResponse = ChapterDetail;

#[derive(Debug, thiserror::Error)]
pub enum GetChapterError {
    #[error("Chapter not found with id: {0}")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl GetChapterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<GetChapterResponse, GetChapterError>> for GetChapterQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetChapterQuery,
) -> Result<GetChapterResponse, GetChapterError> {
    let record = sqlx::query_as::<_, ChapterRecord>(
        r#"
        SELECT id, book_id, title_chapter, text, created_at, updated_at
        FROM chapters
        WHERE id = $1
        "#,
    )
    .bind(query.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetChapterError::NotFound(query.id))?;

    attach_audios(&pool, vec![record])
        .await?
        .pop()
        .ok_or(GetChapterError::NotFound(query.id))
}
