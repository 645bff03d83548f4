use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TITLE_MAX_LENGTH: usize = 255;
pub const AUDIO_URL_MAX_LENGTH: usize = 2048;
pub const TIME_MAX_LENGTH: usize = 64;

/// One playback entry; field names follow the player's camelCase contract
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ListenHistoryItem {
    pub id: i64,
    pub username: String,
    pub title_of_book: String,
    pub title_of_chapter: String,
    pub audio_url: String,
    pub name_of_audio: String,
    /// Playback position as reported by the client
    pub time: String,
    pub created_at: DateTime<Utc>,
}
