use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::my_audio::types::{MyAudioItem, MY_AUDIO_COLUMNS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMyAudioQuery {
    pub username: String,
}

pub type ListMyAudioResponse = Vec<MyAudioItem>;

#[derive(Debug, thiserror::Error)]
pub enum ListMyAudioError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ListMyAudioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

/// Newest first
impl Request<Result<ListMyAudioResponse, ListMyAudioError>> for ListMyAudioQuery {}

#[tracing::instrument(skip(pool), fields(username = %query.username))]
pub async fn handle(
    pool: PgPool,
    query: ListMyAudioQuery,
) -> Result<ListMyAudioResponse, ListMyAudioError> {
    let items = sqlx::query_as::<_, MyAudioItem>(&format!(
        r#"
        SELECT {}
        FROM my_audio m
        JOIN users u ON u.id = m.user_id
        WHERE u.username = $1
        ORDER BY m.id DESC
        "#,
        MY_AUDIO_COLUMNS
    ))
    .bind(&query.username)
    .fetch_all(&pool)
    .await?;

    Ok(items)
}

#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_only_own_audio(pool: PgPool) -> sqlx::Result<()> {
        let bilbo = TestUser::new("bilbo").insert(&pool).await?;
        let frodo = TestUser::new("frodo").insert(&pool).await?;
        for (user_id, name) in [(bilbo, "first"), (bilbo, "second"), (frodo, "other")] {
            sqlx::query("INSERT INTO my_audio (user_id, audio_name, audio_url) VALUES ($1, $2, 'u')")
                .bind(user_id)
                .bind(name)
                .execute(&pool)
                .await?;
        }

        let items = handle(
            pool,
            ListMyAudioQuery {
                username: "bilbo".to_string(),
            },
        )
        .await
        .unwrap();
        let names: Vec<_> = items.iter().map(|i| i.audio_name.as_str()).collect();
        assert_eq!(names, ["second", "first"]);
        Ok(())
    }
}
