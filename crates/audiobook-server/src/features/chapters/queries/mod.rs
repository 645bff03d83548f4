pub mod get;

pub use get::{GetChapterError, GetChapterQuery, GetChapterResponse};
