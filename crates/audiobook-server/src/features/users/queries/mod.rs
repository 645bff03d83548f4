pub mod get;
pub mod list;
pub mod login;

pub use get::{GetUserError, GetUserQuery, GetUserResponse};
pub use list::{ListUsersError, ListUsersResponse};
pub use login::{LoginError, LoginQuery, LoginResponse};
