use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;

/// Category with the number of books filed under it
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategoryListItem {
    pub id: i64,
    pub name: String,
    pub books: i64,
}

pub type ListCategoriesResponse = Vec<CategoryListItem>;

#[derive(Debug, thiserror::Error)]
pub enum ListCategoriesError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ListCategoriesError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Internal
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<ListCategoriesResponse, ListCategoriesError> {
    let categories = sqlx::query_as::<_, CategoryListItem>(
        r#"
        SELECT c.id, c.name, COUNT(b.id) AS books
        FROM categories c
        LEFT JOIN books b ON b.category_id = c.id
        GROUP BY c.id, c.name
        ORDER BY c.id
        "#,
    )
    .fetch_all(&pool)
    .await?;

    Ok(categories)
}
