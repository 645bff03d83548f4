use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::listen_history::types::{
    ListenHistoryItem, AUDIO_URL_MAX_LENGTH, TIME_MAX_LENGTH, TITLE_MAX_LENGTH,
};
use crate::features::shared::validation::{validate_required, FieldValidationError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddListenHistoryCommand {
    pub username: String,
    pub title_of_book: String,
    pub title_of_chapter: String,
    pub audio_url: String,
    pub name_of_audio: String,
    pub time: String,
}

pub type AddListenHistoryResponse = ListenHistoryItem;

#[derive(Debug, thiserror::Error)]
pub enum AddListenHistoryError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),
    #[error("User '{0}' not found")]
    UserNotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AddListenHistoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<AddListenHistoryResponse, AddListenHistoryError>>
    for AddListenHistoryCommand
{
}

impl AddListenHistoryCommand {
    pub fn validate(&self) -> Result<(), AddListenHistoryError> {
        validate_required(&self.username, "Username", TITLE_MAX_LENGTH)?;
        validate_required(&self.title_of_book, "Book title", TITLE_MAX_LENGTH)?;
        validate_required(&self.title_of_chapter, "Chapter title", TITLE_MAX_LENGTH)?;
        validate_required(&self.audio_url, "Audio URL", AUDIO_URL_MAX_LENGTH)?;
        validate_required(&self.name_of_audio, "Audio name", TITLE_MAX_LENGTH)?;
        validate_required(&self.time, "Time", TIME_MAX_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
pub async fn handle(
    pool: PgPool,
    command: AddListenHistoryCommand,
) -> Result<AddListenHistoryResponse, AddListenHistoryError> {
    command.validate()?;

    let item = sqlx::query_as::<_, ListenHistoryItem>(
        r#"
        INSERT INTO listen_history
            (user_id, title_of_book, title_of_chapter, audio_url, name_of_audio, time)
        SELECT u.id, $2, $3, $4, $5, $6
        FROM users u
        WHERE u.username = $1
        RETURNING id, $1 AS username, title_of_book, title_of_chapter, audio_url,
                  name_of_audio, time, created_at
        "#,
    )
    .bind(&command.username)
    .bind(command.title_of_book.trim())
    .bind(command.title_of_chapter.trim())
    .bind(command.audio_url.trim())
    .bind(command.name_of_audio.trim())
    .bind(command.time.trim())
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AddListenHistoryError::UserNotFound(command.username.clone()))?;

    tracing::debug!(entry_id = item.id, "Listen history recorded");

    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> serde_json::Value {
        serde_json::json!({
            "username": "bilbo",
            "titleOfBook": "The Hobbit",
            "titleOfChapter": "Riddles in the Dark",
            "audioUrl": "https://media.example.com/riddles.mp3",
            "nameOfAudio": "riddles",
            "time": "03:14"
        })
    }

    #[test]
    fn test_deserialize_camel_case() {
        let cmd: AddListenHistoryCommand = serde_json::from_value(body()).unwrap();
        assert_eq!(cmd.title_of_chapter, "Riddles in the Dark");
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_time() {
        let mut value = body();
        value["time"] = serde_json::json!("");
        let cmd: AddListenHistoryCommand = serde_json::from_value(value).unwrap();
        assert!(matches!(
            cmd.validate(),
            Err(AddListenHistoryError::Validation(FieldValidationError::Required { field: "Time" }))
        ));
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    fn command(username: &str) -> AddListenHistoryCommand {
        AddListenHistoryCommand {
            username: username.to_string(),
            title_of_book: "The Hobbit".to_string(),
            title_of_chapter: "Chapter 1".to_string(),
            audio_url: "https://media.example.com/c1.mp3".to_string(),
            name_of_audio: "c1".to_string(),
            time: "00:42".to_string(),
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_records_entry(pool: PgPool) -> sqlx::Result<()> {
        TestUser::new("bilbo").insert(&pool).await?;

        let item = handle(pool.clone(), command("bilbo")).await.unwrap();
        assert_eq!(item.username, "bilbo");
        assert_eq!(item.time, "00:42");
        assert_eq!(count_rows(&pool, "listen_history").await?, 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_unknown_user(pool: PgPool) -> sqlx::Result<()> {
        let result = handle(pool.clone(), command("gollum")).await;
        assert!(matches!(result, Err(AddListenHistoryError::UserNotFound(_))));
        assert_eq!(count_rows(&pool, "listen_history").await?, 0);
        Ok(())
    }
}
