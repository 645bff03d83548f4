//! User API routes
//!
//! # Route Structure
//!
//! - `POST /api/v1/users/register` - Create an account
//! - `POST /api/v1/users/login` - Check credentials, returns the role
//! - `GET /api/v1/users` - List all users
//! - `GET /api/v1/users/:username` - Get a single user
//! - `PUT /api/v1/users/:username` - Administrative update (role, contact fields)
//! - `PUT /api/v1/users/:username/profile` - Self-service profile update
//! - `PUT /api/v1/users/:username/password` - Change password
//! - `DELETE /api/v1/users/:username` - Delete a user and their activity

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use sqlx::PgPool;

use crate::api::response::{error_response, ApiResponse, ErrorKind};

use super::{
    commands::{
        ChangePasswordCommand, ChangePasswordError, DeleteUserCommand, DeleteUserError,
        RegisterUserCommand, RegisterUserError, UpdateProfileCommand, UpdateProfileError,
        UpdateUserCommand, UpdateUserError,
    },
    queries::{GetUserError, GetUserQuery, ListUsersError, LoginError, LoginQuery},
};

pub fn users_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_users))
        .route("/register", post(register_user))
        .route("/login", post(login))
        .route(
            "/:username",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/:username/profile", put(update_profile))
        .route("/:username/password", put(change_password))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// `POST /api/v1/users/register`
///
/// - `201 Created` - Account created
/// - `400 Bad Request` - Validation error
/// - `409 Conflict` - Username already taken
#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
async fn register_user(
    State(pool): State<PgPool>,
    Json(command): Json<RegisterUserCommand>,
) -> Result<Response, UserApiError> {
    let response = super::commands::register::handle(pool, command).await?;
    Ok(ApiResponse::success(response).with_status(StatusCode::CREATED))
}

#[tracing::instrument(skip(pool, command), fields(username = %username))]
async fn update_user(
    State(pool): State<PgPool>,
    Path(username): Path<String>,
    Json(mut command): Json<UpdateUserCommand>,
) -> Result<Response, UserApiError> {
    command.username = username;

    let response = super::commands::update::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool, command), fields(username = %username))]
async fn update_profile(
    State(pool): State<PgPool>,
    Path(username): Path<String>,
    Json(mut command): Json<UpdateProfileCommand>,
) -> Result<Response, UserApiError> {
    command.username = username;

    let response = super::commands::update_profile::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

/// `PUT /api/v1/users/:username/password`
///
/// - `200 OK` - Password changed
/// - `401 Unauthorized` - Old password is wrong
/// - `404 Not Found` - Unknown user
#[tracing::instrument(skip(pool, command), fields(username = %username))]
async fn change_password(
    State(pool): State<PgPool>,
    Path(username): Path<String>,
    Json(mut command): Json<ChangePasswordCommand>,
) -> Result<Response, UserApiError> {
    command.username = username;

    let response = super::commands::change_password::handle(pool, command).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool), fields(username = %username))]
async fn delete_user(
    State(pool): State<PgPool>,
    Path(username): Path<String>,
) -> Result<Response, UserApiError> {
    let response =
        super::commands::delete::handle(pool, DeleteUserCommand { username }).await?;
    Ok(ApiResponse::success(response).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// `POST /api/v1/users/login`
///
/// - `200 OK` - `{ "username", "role" }`
/// - `401 Unauthorized` - Unknown user or wrong password
#[tracing::instrument(skip(pool, query), fields(username = %query.username))]
async fn login(
    State(pool): State<PgPool>,
    Json(query): Json<LoginQuery>,
) -> Result<Response, UserApiError> {
    let response = super::queries::login::handle(pool, query).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn list_users(State(pool): State<PgPool>) -> Result<Response, UserApiError> {
    let response = super::queries::list::handle(pool).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool), fields(username = %username))]
async fn get_user(
    State(pool): State<PgPool>,
    Path(username): Path<String>,
) -> Result<Response, UserApiError> {
    let response = super::queries::get::handle(pool, GetUserQuery { username }).await?;
    Ok(ApiResponse::success(response).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for user API endpoints
#[derive(Debug, thiserror::Error)]
enum UserApiError {
    #[error(transparent)]
    Register(#[from] RegisterUserError),
    #[error(transparent)]
    Update(#[from] UpdateUserError),
    #[error(transparent)]
    UpdateProfile(#[from] UpdateProfileError),
    #[error(transparent)]
    ChangePassword(#[from] ChangePasswordError),
    #[error(transparent)]
    Delete(#[from] DeleteUserError),
    #[error(transparent)]
    Login(#[from] LoginError),
    #[error(transparent)]
    Get(#[from] GetUserError),
    #[error(transparent)]
    List(#[from] ListUsersError),
}

impl UserApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Register(e) => e.kind(),
            Self::Update(e) => e.kind(),
            Self::UpdateProfile(e) => e.kind(),
            Self::ChangePassword(e) => e.kind(),
            Self::Delete(e) => e.kind(),
            Self::Login(e) => e.kind(),
            Self::Get(e) => e.kind(),
            Self::List(e) => e.kind(),
        }
    }
}

impl IntoResponse for UserApiError {
    fn into_response(self) -> Response {
        error_response(self.kind(), &self)
    }
}
