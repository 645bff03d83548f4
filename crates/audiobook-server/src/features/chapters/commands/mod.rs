pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateChapterCommand, CreateChapterError, CreateChapterResponse};
pub use delete::{DeleteChapterCommand, DeleteChapterError, DeleteChapterResponse};
pub use update::{UpdateChapterCommand, UpdateChapterError, UpdateChapterResponse};
