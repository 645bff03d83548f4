//! User accounts: registration, login, profile and administration

pub mod commands;
pub mod password;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    ChangePasswordCommand, ChangePasswordError, DeleteUserCommand, DeleteUserError,
    RegisterUserCommand, RegisterUserError, UpdateProfileCommand, UpdateProfileError,
    UpdateUserCommand, UpdateUserError,
};
pub use queries::{GetUserError, GetUserQuery, ListUsersError, LoginError, LoginQuery};
pub use routes::users_routes;
pub use types::{PublicUser, UserRole};
