use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::users::types::PublicUser;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserQuery {
    pub username: String,
}

pub type GetUserResponse = PublicUser;

#[derive(Debug, thiserror::Error)]
pub enum GetUserError {
    #[error("Username is required and cannot be empty")]
    UsernameRequired,
    #[error("User '{0}' not found")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl GetUserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UsernameRequired => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<GetUserResponse, GetUserError>> for GetUserQuery {}

impl GetUserQuery {
    pub fn validate(&self) -> Result<(), GetUserError> {
        if self.username.is_empty() {
            return Err(GetUserError::UsernameRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetUserQuery) -> Result<GetUserResponse, GetUserError> {
    query.validate()?;

    sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT id, username, fullname, email, phonenumber, role, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(&query.username)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| GetUserError::NotFound(query.username.clone()))
}
