pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateAudioCommand, CreateAudioError, CreateAudioResponse};
pub use delete::{DeleteAudioCommand, DeleteAudioError, DeleteAudioResponse};
pub use update::{UpdateAudioCommand, UpdateAudioError, UpdateAudioResponse};
