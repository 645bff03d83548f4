//! Register user command
//!
//! Creates a `USER` account. The password is stored as an argon2id hash.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::shared::error_helpers::map_unique_violation;
use crate::features::shared::validation::{
    validate_email, validate_password, validate_phone, validate_required, validate_username,
    FieldValidationError,
};
use crate::features::users::password::{hash_password, PasswordHashError};
use crate::features::users::types::{PublicUser, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
    pub fullname: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonenumber: Option<String>,
}

pub type RegisterUserResponse = PublicUser;

#[derive(Debug, thiserror::Error)]
pub enum RegisterUserError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),

    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error(transparent)]
    Password(#[from] PasswordHashError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RegisterUserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::DuplicateUsername(_) => ErrorKind::Conflict,
            Self::Password(_) | Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<RegisterUserResponse, RegisterUserError>> for RegisterUserCommand {}

impl RegisterUserCommand {
    pub fn validate(&self) -> Result<(), RegisterUserError> {
        validate_username(&self.username)?;
        validate_password(&self.password)?;
        validate_required(&self.fullname, "Full name", 255)?;
        validate_email(&self.email)?;
        validate_phone(self.phonenumber.as_deref())?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
pub async fn handle(
    pool: PgPool,
    command: RegisterUserCommand,
) -> Result<RegisterUserResponse, RegisterUserError> {
    command.validate()?;

    let password_hash = hash_password(&command.password).await?;
    let phonenumber = command.phonenumber.filter(|p| !p.is_empty());

    let user = sqlx::query_as::<_, PublicUser>(
        r#"
        INSERT INTO users (username, password_hash, fullname, email, phonenumber, role)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, username, fullname, email, phonenumber, role, created_at
        "#,
    )
    .bind(&command.username)
    .bind(password_hash)
    .bind(command.fullname.trim())
    .bind(&command.email)
    .bind(phonenumber)
    .bind(UserRole::User.as_str())
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        map_unique_violation(
            e,
            RegisterUserError::DuplicateUsername(command.username.clone()),
            RegisterUserError::Database,
        )
    })?;

    tracing::info!(user_id = user.id, "User registered");

    Ok(user)
}
