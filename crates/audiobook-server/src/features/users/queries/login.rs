//! Credential check
//!
//! Returns the account's role on success. Unknown users and wrong passwords
//! produce the same error, and both pay for one argon2 verification.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::users::password::verify_password;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginQuery {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub username: String,
    pub role: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LoginError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredentials => ErrorKind::Validation,
            Self::InvalidCredentials => ErrorKind::Unauthorized,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<LoginResponse, LoginError>> for LoginQuery {}

impl LoginQuery {
    pub fn validate(&self) -> Result<(), LoginError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(LoginError::MissingCredentials);
        }
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CredentialRecord {
    username: String,
    password_hash: String,
    role: String,
}

#[tracing::instrument(skip(pool, query), fields(username = %query.username))]
pub async fn handle(pool: PgPool, query: LoginQuery) -> Result<LoginResponse, LoginError> {
    query.validate()?;

    let record = sqlx::query_as::<_, CredentialRecord>(
        "SELECT username, password_hash, role FROM users WHERE username = $1",
    )
    .bind(&query.username)
    .fetch_optional(&pool)
    .await?;

    let verified = verify_password(
        &query.password,
        record.as_ref().map(|r| r.password_hash.as_str()),
    )
    .await;

    match record {
        Some(record) if verified => {
            tracing::info!(role = %record.role, "User logged in");
            Ok(LoginResponse {
                username: record.username,
                role: record.role,
            })
        },
        _ => {
            tracing::warn!("Login rejected");
            Err(LoginError::InvalidCredentials)
        },
    }
}
