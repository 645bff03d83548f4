//! Audio files attached to chapters
//!
//! Reads go through the chapter and book endpoints, which embed audios.

pub mod commands;
pub mod routes;

pub use commands::{
    CreateAudioCommand, CreateAudioError, DeleteAudioCommand, DeleteAudioError,
    UpdateAudioCommand, UpdateAudioError,
};
pub use routes::audios_routes;
