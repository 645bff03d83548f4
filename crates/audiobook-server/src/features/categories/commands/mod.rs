pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateCategoryCommand, CreateCategoryError, CreateCategoryResponse};
pub use delete::{DeleteCategoryCommand, DeleteCategoryError, DeleteCategoryResponse};
pub use update::{UpdateCategoryCommand, UpdateCategoryError, UpdateCategoryResponse};
