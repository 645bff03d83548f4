//! Administrative user update
//!
//! Only the provided fields change; the username is taken from the path.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::shared::validation::{
    validate_email, validate_phone, validate_required, FieldValidationError,
};
use crate::features::users::types::{PublicUser, UserRole};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserCommand {
    #[serde(skip)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonenumber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

pub type UpdateUserResponse = PublicUser;

#[derive(Debug, thiserror::Error)]
pub enum UpdateUserError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),

    #[error("At least one field must be provided for update")]
    NoFieldsToUpdate,

    #[error("User '{0}' not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UpdateUserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::NoFieldsToUpdate => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<UpdateUserResponse, UpdateUserError>> for UpdateUserCommand {}

impl UpdateUserCommand {
    pub fn validate(&self) -> Result<(), UpdateUserError> {
        if self.fullname.is_none()
            && self.email.is_none()
            && self.phonenumber.is_none()
            && self.role.is_none()
        {
            return Err(UpdateUserError::NoFieldsToUpdate);
        }

        if let Some(fullname) = &self.fullname {
            validate_required(fullname, "Full name", 255)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        validate_phone(self.phonenumber.as_deref())?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
pub async fn handle(
    pool: PgPool,
    command: UpdateUserCommand,
) -> Result<UpdateUserResponse, UpdateUserError> {
    command.validate()?;

    let user = sqlx::query_as::<_, PublicUser>(
        r#"
        UPDATE users
        SET fullname = COALESCE($2, fullname),
            email = COALESCE($3, email),
            phonenumber = COALESCE($4, phonenumber),
            role = COALESCE($5, role),
            updated_at = NOW()
        WHERE username = $1
        RETURNING id, username, fullname, email, phonenumber, role, created_at
        "#,
    )
    .bind(&command.username)
    .bind(command.fullname.as_deref().map(str::trim))
    .bind(command.email.as_deref())
    .bind(command.phonenumber.as_deref())
    .bind(command.role.map(UserRole::as_str))
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| UpdateUserError::NotFound(command.username.clone()))?;

    tracing::info!(user_id = user.id, role = %user.role, "User updated");

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_requires_a_field() {
        let cmd = UpdateUserCommand {
            username: "bilbo".to_string(),
            ..Default::default()
        };
        assert!(matches!(cmd.validate(), Err(UpdateUserError::NoFieldsToUpdate)));
    }

    #[test]
    fn test_validation_role_only() {
        let cmd: UpdateUserCommand =
            serde_json::from_value(serde_json::json!({ "role": "ADMIN" })).unwrap();
        assert_eq!(cmd.role, Some(UserRole::Admin));
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_validation_bad_email() {
        let cmd = UpdateUserCommand {
            username: "bilbo".to_string(),
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert_eq!(cmd.validate().unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_username_not_read_from_body() {
        let cmd: UpdateUserCommand = serde_json::from_value(serde_json::json!({
            "username": "mallory",
            "fullname": "Bilbo"
        }))
        .unwrap();
        assert!(cmd.username.is_empty());
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::features::shared::test_helpers::TestUser;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_merges_fields(pool: PgPool) -> sqlx::Result<()> {
        TestUser::new("bilbo").insert(&pool).await?;

        let cmd = UpdateUserCommand {
            username: "bilbo".to_string(),
            role: Some(UserRole::Admin),
            ..Default::default()
        };
        let user = handle(pool.clone(), cmd).await.unwrap();
        assert_eq!(user.role, "ADMIN");
        assert_eq!(user.email, "bilbo@example.com");
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_not_found(pool: PgPool) -> sqlx::Result<()> {
        let cmd = UpdateUserCommand {
            username: "nobody".to_string(),
            fullname: Some("No One".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            handle(pool, cmd).await,
            Err(UpdateUserError::NotFound(_))
        ));
        Ok(())
    }
}
