use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::listen_history::types::ListenHistoryItem;
use crate::features::shared::pagination::{Paginated, PaginationParams};

pub const HISTORY_PER_PAGE: i64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListListenHistoryQuery {
    #[serde(skip)]
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

pub type ListListenHistoryResponse = Paginated<ListenHistoryItem>;

#[derive(Debug, thiserror::Error)]
pub enum ListListenHistoryError {
    #[error("{0}")]
    InvalidPagination(&'static str),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ListListenHistoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPagination(_) => ErrorKind::Validation,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<ListListenHistoryResponse, ListListenHistoryError>>
    for ListListenHistoryQuery
{
}

impl ListListenHistoryQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.per_page).with_default_per_page(HISTORY_PER_PAGE)
    }

    pub fn validate(&self) -> Result<(), ListListenHistoryError> {
        self.pagination()
            .validate()
            .map_err(ListListenHistoryError::InvalidPagination)
    }
}

/// Most recent entries first; an unknown user simply has no history
#[tracing::instrument(skip(pool), fields(username = %query.username))]
pub async fn handle(
    pool: PgPool,
    query: ListListenHistoryQuery,
) -> Result<ListListenHistoryResponse, ListListenHistoryError> {
    query.validate()?;

    let params = query.pagination();

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM listen_history h
        JOIN users u ON u.id = h.user_id
        WHERE u.username = $1
        "#,
    )
    .bind(&query.username)
    .fetch_one(&pool)
    .await?;

    let items = sqlx::query_as::<_, ListenHistoryItem>(
        r#"
        SELECT h.id, u.username, h.title_of_book, h.title_of_chapter, h.audio_url,
               h.name_of_audio, h.time, h.created_at
        FROM listen_history h
        JOIN users u ON u.id = h.user_id
        WHERE u.username = $1
        ORDER BY h.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&query.username)
    .bind(params.per_page())
    .bind(params.offset())
    .fetch_all(&pool)
    .await?;

    Ok(Paginated::from_items(items, &params, total))
}


#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::features::listen_history::commands::add::{self, AddListenHistoryCommand};
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_most_recent_first(pool: PgPool) -> sqlx::Result<()> {
        TestUser::new("bilbo").insert(&pool).await?;
        TestUser::new("frodo").insert(&pool).await?;

        for (username, chapter) in [("bilbo", "One"), ("bilbo", "Two"), ("frodo", "Three")] {
            add::handle(
                pool.clone(),
                AddListenHistoryCommand {
                    username: username.to_string(),
                    title_of_book: "The Hobbit".to_string(),
                    title_of_chapter: chapter.to_string(),
                    audio_url: "https://media.example.com/a.mp3".to_string(),
                    name_of_audio: "a".to_string(),
                    time: "00:00".to_string(),
                },
            )
            .await
            .unwrap();
        }

        let page = handle(
            pool,
            ListListenHistoryQuery {
                username: "bilbo".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.items[0].title_of_chapter, "Two");
        assert_eq!(page.items[1].title_of_chapter, "One");
        assert!(page.items.iter().all(|item| item.username == "bilbo"));
        Ok(())
    }
}
