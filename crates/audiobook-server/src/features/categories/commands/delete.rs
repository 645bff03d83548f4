use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::shared::error_helpers::map_foreign_key_violation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCategoryCommand {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCategoryResponse {
    pub id: i64,
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteCategoryError {
    #[error("Category with id {0} not found")]
    NotFound(i64),
    #[error("Cannot delete category {id}: it still has {books} book(s)")]
    HasBooks { id: i64, books: i64 },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DeleteCategoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::HasBooks { .. } => ErrorKind::Conflict,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

/// Categories that still own books are kept
impl Request<Result<DeleteCategoryResponse, DeleteCategoryError>> for DeleteCategoryCommand {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteCategoryCommand,
) -> Result<DeleteCategoryResponse, DeleteCategoryError> {
    let books: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE category_id = $1")
        .bind(command.id)
        .fetch_one(&pool)
        .await?;

    if books > 0 {
        return Err(DeleteCategoryError::HasBooks {
            id: command.id,
            books,
        });
    }

    // a book inserted after the count still trips the foreign key
    let deleted = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(command.id)
        .execute(&pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(
                e,
                DeleteCategoryError::HasBooks {
                    id: command.id,
                    books: 1,
                },
                DeleteCategoryError::Database,
            )
        })?
        .rows_affected();

    if deleted == 0 {
        return Err(DeleteCategoryError::NotFound(command.id));
    }

    tracing::info!(category_id = command.id, "Category deleted");

    Ok(DeleteCategoryResponse {
        id: command.id,
        deleted: true,
    })
}


#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::features::shared::test_helpers::{TestBook, TestCategory};

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_refuses_category_with_books(pool: PgPool) -> sqlx::Result<()> {
        let id = TestCategory::new("Fantasy").insert(&pool).await?;
        TestBook::new(id, "The Hobbit").insert(&pool).await?;

        let result = handle(pool, DeleteCategoryCommand { id }).await;
        assert!(matches!(result, Err(DeleteCategoryError::HasBooks { books: 1, .. })));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_deletes_empty_category(pool: PgPool) -> sqlx::Result<()> {
        let id = TestCategory::new("Poetry").insert(&pool).await?;

        assert!(handle(pool.clone(), DeleteCategoryCommand { id }).await.unwrap().deleted);
        assert!(matches!(
            handle(pool, DeleteCategoryCommand { id }).await,
            Err(DeleteCategoryError::NotFound(_))
        ));
        Ok(())
    }
}
