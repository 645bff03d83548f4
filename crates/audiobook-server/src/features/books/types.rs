use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::features::chapters::types::ChapterDetail;

pub const TITLE_MAX_LENGTH: usize = 255;
pub const AUTHOR_MAX_LENGTH: usize = 255;
pub const PUBLISHED_MAX_LENGTH: usize = 64;

/// Columns and joins shared by every book read; `s` carries review aggregates
pub(crate) const BOOK_SUMMARY_FROM: &str = r#"
    FROM books b
    JOIN categories c ON c.id = b.category_id
    LEFT JOIN (
        SELECT book_id, AVG(rating)::float8 AS rating, COUNT(*) AS review_count
        FROM reviews
        GROUP BY book_id
    ) s ON s.book_id = b.id
"#;

pub(crate) const BOOK_SUMMARY_COLUMNS: &str = r#"
    SELECT b.id, b.title, b.author, b.image, b.description, b.published,
           b.category_id, c.name AS category,
           COALESCE(s.rating, 0)::float8 AS rating,
           COALESCE(s.review_count, 0) AS review_count
"#;

/// Book as shown in listings, with its category name and review aggregates
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub image: String,
    pub description: String,
    pub published: Option<String>,
    pub category_id: i64,
    pub category: String,
    /// Average review rating, 0 when the book has no reviews
    pub rating: f64,
    pub review_count: i64,
}

/// Book with its chapters and their audio files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: BookSummary,
    pub chapters: Vec<ChapterDetail>,
}

/// Stored book row returned by writes
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub image: String,
    pub description: String,
    pub published: Option<String>,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_detail_flattens_summary() {
        let detail = BookDetail {
            book: BookSummary {
                id: 1,
                title: "The Hobbit".to_string(),
                author: "J. R. R. Tolkien".to_string(),
                image: "hobbit.png".to_string(),
                description: String::new(),
                published: Some("1937".to_string()),
                category_id: 2,
                category: "Fantasy".to_string(),
                rating: 4.5,
                review_count: 2,
            },
            chapters: vec![],
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["title"], "The Hobbit");
        assert_eq!(json["category"], "Fantasy");
        assert_eq!(json["rating"], 4.5);
        assert!(json.get("book").is_none());
        assert!(json["chapters"].is_array());
    }
}
