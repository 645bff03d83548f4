pub mod list;

pub use list::{CategoryListItem, ListCategoriesError, ListCategoriesResponse};
