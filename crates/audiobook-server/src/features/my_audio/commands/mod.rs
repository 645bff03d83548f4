pub mod add;
pub mod delete;
pub mod update;

pub use add::{AddMyAudioCommand, AddMyAudioError, AddMyAudioResponse};
pub use delete::{DeleteMyAudioCommand, DeleteMyAudioError, DeleteMyAudioResponse};
pub use update::{UpdateMyAudioCommand, UpdateMyAudioError, UpdateMyAudioResponse};
