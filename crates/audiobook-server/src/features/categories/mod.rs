//! Book categories

pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateCategoryCommand, CreateCategoryError, DeleteCategoryCommand, DeleteCategoryError,
    UpdateCategoryCommand, UpdateCategoryError,
};
pub use queries::{CategoryListItem, ListCategoriesError};
pub use routes::categories_routes;
