use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Author of a review as shown to other readers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewUser {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    pub id: i64,
    pub review: String,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
    pub user: ReviewUser,
}

/// Review row joined with its author's username
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ReviewRow {
    pub id: i64,
    pub review: String,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
    pub username: String,
}

impl From<ReviewRow> for ReviewItem {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: row.id,
            review: row.review,
            rating: row.rating,
            created_at: row.created_at,
            user: ReviewUser {
                username: row.username,
            },
        }
    }
}

/// Number of reviews per star rating
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingCounts {
    pub one: i64,
    pub two: i64,
    pub three: i64,
    pub four: i64,
    pub five: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_reviews: i64,
    /// Rounded to two decimals, 0 when there are no reviews
    pub average_rating: f64,
    pub rating_counts: RatingCounts,
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewStatsRow {
    total_reviews: i64,
    average_rating: f64,
    one: i64,
    two: i64,
    three: i64,
    four: i64,
    five: i64,
}

impl From<ReviewStatsRow> for ReviewStats {
    fn from(row: ReviewStatsRow) -> Self {
        Self {
            total_reviews: row.total_reviews,
            average_rating: row.average_rating,
            rating_counts: RatingCounts {
                one: row.one,
                two: row.two,
                three: row.three,
                four: row.four,
                five: row.five,
            },
        }
    }
}

/// Aggregate the reviews of one book, or of every book when `book_id` is `None`
pub(crate) async fn load_stats(
    pool: &PgPool,
    book_id: Option<i64>,
) -> Result<ReviewStats, sqlx::Error> {
    let row = sqlx::query_as::<_, ReviewStatsRow>(
        r#"
        SELECT COUNT(*) AS total_reviews,
               COALESCE(ROUND(AVG(rating)::numeric, 2), 0)::float8 AS average_rating,
               COUNT(*) FILTER (WHERE rating = 1) AS one,
               COUNT(*) FILTER (WHERE rating = 2) AS two,
               COUNT(*) FILTER (WHERE rating = 3) AS three,
               COUNT(*) FILTER (WHERE rating = 4) AS four,
               COUNT(*) FILTER (WHERE rating = 5) AS five
        FROM reviews
        WHERE ($1::BIGINT IS NULL OR book_id = $1)
        "#,
    )
    .bind(book_id)
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

pub(crate) async fn book_exists(pool: &PgPool, book_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
        .bind(book_id)
        .fetch_one(pool)
        .await
}
