//! Audio clips saved by users

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    AddMyAudioCommand, AddMyAudioError, DeleteMyAudioCommand, DeleteMyAudioError,
    UpdateMyAudioCommand, UpdateMyAudioError,
};
pub use queries::{ListMyAudioError, ListMyAudioQuery};
pub use routes::my_audio_routes;
pub use types::MyAudioItem;
