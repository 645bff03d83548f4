//! Self-service profile update
//!
//! Replaces full name, email and phone number in one go.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::shared::validation::{
    validate_email, validate_phone, validate_required, FieldValidationError,
};
use crate::features::users::types::PublicUser;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileCommand {
    #[serde(skip)]
    pub username: String,
    pub fullname: String,
    pub email: String,
    #[serde(default)]
    pub phonenumber: Option<String>,
}

pub type UpdateProfileResponse = PublicUser;

#[derive(Debug, thiserror::Error)]
pub enum UpdateProfileError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),

    #[error("User '{0}' not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UpdateProfileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<UpdateProfileResponse, UpdateProfileError>> for UpdateProfileCommand {}

impl UpdateProfileCommand {
    pub fn validate(&self) -> Result<(), UpdateProfileError> {
        validate_required(&self.fullname, "Full name", 255)?;
        validate_email(&self.email)?;
        validate_phone(self.phonenumber.as_deref())?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
pub async fn handle(
    pool: PgPool,
    command: UpdateProfileCommand,
) -> Result<UpdateProfileResponse, UpdateProfileError> {
    command.validate()?;

    let phonenumber = command.phonenumber.as_deref().filter(|p| !p.is_empty());

    sqlx::query_as::<_, PublicUser>(
        r#"
        UPDATE users
        SET fullname = $2, email = $3, phonenumber = $4, updated_at = NOW()
        WHERE username = $1
        RETURNING id, username, fullname, email, phonenumber, role, created_at
        "#,
    )
    .bind(&command.username)
    .bind(command.fullname.trim())
    .bind(&command.email)
    .bind(phonenumber)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| UpdateProfileError::NotFound(command.username.clone()))
}
