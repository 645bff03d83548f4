use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const AUDIO_NAME_MAX_LENGTH: usize = 255;
pub const AUDIO_URL_MAX_LENGTH: usize = 2048;

/// Audio clip saved by a user, e.g. a text-to-speech rendering
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MyAudioItem {
    pub id: i64,
    pub username: String,
    pub audio_name: String,
    pub audio_url: String,
    pub created_at: DateTime<Utc>,
}

pub(crate) const MY_AUDIO_COLUMNS: &str =
    "m.id, u.username, m.audio_name, m.audio_url, m.created_at";
