//! Book chapters and their audio listings

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    CreateChapterCommand, CreateChapterError, DeleteChapterCommand, DeleteChapterError,
    UpdateChapterCommand, UpdateChapterError,
};
pub use queries::{GetChapterError, GetChapterQuery};
pub use routes::chapters_routes;
pub use types::{AudioItem, ChapterDetail};
