use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;

/// Audio file attached to a chapter
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AudioItem {
    pub id: i64,
    pub chapter_id: i64,
    pub audio_name: String,
    pub audio_file: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChapterRecord {
    pub id: i64,
    pub book_id: i64,
    pub title_chapter: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chapter with its audio files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterDetail {
    pub id: i64,
    pub book_id: i64,
    pub chapter_title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub audios: Vec<AudioItem>,
}

impl ChapterDetail {
    pub fn from_record(record: ChapterRecord, audios: Vec<AudioItem>) -> Self {
        Self {
            id: record.id,
            book_id: record.book_id,
            chapter_title: record.title_chapter,
            text: record.text,
            created_at: record.created_at,
            updated_at: record.updated_at,
            audios,
        }
    }
}

/// Load the audios of several chapters in one query and attach them, keeping chapter order
pub async fn attach_audios(
    pool: &PgPool,
    chapters: Vec<ChapterRecord>,
) -> Result<Vec<ChapterDetail>, sqlx::Error> {
    if chapters.is_empty() {
        return Ok(Vec::new());
    }

    let chapter_ids: Vec<i64> = chapters.iter().map(|c| c.id).collect();

    let audios = sqlx::query_as::<_, AudioItem>(
        r#"
        SELECT id, chapter_id, audio_name, audio_file, created_at
        FROM audios
        WHERE chapter_id = ANY($1)
        ORDER BY id
        "#,
    )
    .bind(&chapter_ids)
    .fetch_all(pool)
    .await?;

    let mut by_chapter: HashMap<i64, Vec<AudioItem>> = HashMap::new();
    for audio in audios {
        by_chapter.entry(audio.chapter_id).or_default().push(audio);
    }

    Ok(chapters
        .into_iter()
        .map(|chapter| {
            let audios = by_chapter.remove(&chapter.id).unwrap_or_default();
            ChapterDetail::from_record(chapter, audios)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_detail_wire_names() {
        let now = Utc::now();
        let detail = ChapterDetail::from_record(
            ChapterRecord {
                id: 4,
                book_id: 2,
                title_chapter: "Riddles in the Dark".to_string(),
                text: String::new(),
                created_at: now,
                updated_at: now,
            },
            vec![],
        );

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["chapter_title"], "Riddles in the Dark");
        assert_eq!(json["book_id"], 2);
        assert!(json["audios"].as_array().unwrap().is_empty());
        assert!(json.get("title_chapter").is_none());
    }
}
