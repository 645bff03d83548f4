use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::users::types::PublicUser;

pub type ListUsersResponse = Vec<PublicUser>;

#[derive(Debug, thiserror::Error)]
pub enum ListUsersError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ListUsersError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Internal
    }
}

/// All accounts ordered by id
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<ListUsersResponse, ListUsersError> {
    let users = sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT id, username, fullname, email, phonenumber, role, created_at
        FROM users
        ORDER BY id
        "#,
    )
    .fetch_all(&pool)
    .await?;

    tracing::debug!(count = users.len(), "Users listed");

    Ok(users)
}

#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::features::shared::test_helpers::TestUser;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_orders_by_id(pool: PgPool) -> sqlx::Result<()> {
        TestUser::new("zed").insert(&pool).await?;
        TestUser::new("amy").insert(&pool).await?;

        let users = handle(pool).await.unwrap();
        let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["zed", "amy"]);
        Ok(())
    }
}
