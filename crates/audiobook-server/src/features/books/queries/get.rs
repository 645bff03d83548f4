use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::books::types::{
    BookDetail, BookSummary, BOOK_SUMMARY_COLUMNS, BOOK_SUMMARY_FROM,
};
use crate::features::chapters::types::{attach_audios, ChapterRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBookQuery {
    pub id: i64,
}

pub type GetBookResponse = BookDetail;

#[derive(Debug, thiserror::Error)]
pub enum GetBookError {
    #[error("Book not found with id: {0}")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl GetBookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

/// Book with review aggregates, chapters in id order and each chapter's audios
impl Request<Result<GetBookResponse, GetBookError>> for GetBookQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetBookQuery) -> Result<GetBookResponse, GetBookError> {
    let book = sqlx::query_as::<_, BookSummary>(&format!(
        "{} {} WHERE b.id = $1",
        BOOK_SUMMARY_COLUMNS, BOOK_SUMMARY_FROM
    ))
    .bind(query.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetBookError::NotFound(query.id))?;

    let chapters = sqlx::query_as::<_, ChapterRecord>(
        r#"
        SELECT id, book_id, title_chapter, text, created_at, updated_at
        FROM chapters
        WHERE book_id = $1
        ORDER BY id
        "#,
    )
    .bind(query.id)
    .fetch_all(&pool)
    .await?;

    let chapters = attach_audios(&pool, chapters).await?;

    Ok(BookDetail { book, chapters })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = GetBookError::NotFound(42);
        assert_eq!(err.to_string(), "Book not found with id: 42");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
