//! Media uploads to the object store
//!
//! Uploaded files get a URL that books, audios and saved clips can reference.

pub mod commands;
pub mod routes;

pub use commands::{UploadFileCommand, UploadFileError, UploadFileResponse};
pub use routes::files_routes;
