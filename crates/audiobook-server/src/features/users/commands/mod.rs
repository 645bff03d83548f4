pub mod change_password;
pub mod delete;
pub mod register;
pub mod update;
pub mod update_profile;

pub use change_password::{ChangePasswordCommand, ChangePasswordError, ChangePasswordResponse};
pub use delete::{DeleteUserCommand, DeleteUserError, DeleteUserResponse};
pub use register::{RegisterUserCommand, RegisterUserError, RegisterUserResponse};
pub use update::{UpdateUserCommand, UpdateUserError, UpdateUserResponse};
pub use update_profile::{UpdateProfileCommand, UpdateProfileError, UpdateProfileResponse};
