pub mod featured;
pub mod get;
pub mod list;

pub use featured::{FeaturedBooksError, FeaturedBooksQuery, FeaturedBooksResponse};
pub use get::{GetBookError, GetBookQuery, GetBookResponse};
pub use list::{ListBooksError, ListBooksQuery, ListBooksResponse};
