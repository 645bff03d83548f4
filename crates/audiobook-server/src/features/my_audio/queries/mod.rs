pub mod list_for_user;

pub use list_for_user::{ListMyAudioError, ListMyAudioQuery, ListMyAudioResponse};
