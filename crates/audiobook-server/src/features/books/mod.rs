//! Book catalogue: listing, featured picks, detail with chapters, and CRUD

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    CreateBookCommand, CreateBookError, DeleteBookCommand, DeleteBookError, UpdateBookCommand,
    UpdateBookError,
};
pub use queries::{
    FeaturedBooksError, FeaturedBooksQuery, GetBookError, GetBookQuery, ListBooksError,
    ListBooksQuery,
};
pub use routes::books_routes;
pub use types::{BookDetail, BookRecord, BookSummary};
