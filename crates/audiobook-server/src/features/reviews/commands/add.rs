use mediator::Request;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::reviews::types::{ReviewItem, ReviewUser};
use crate::features::shared::error_helpers::violated_foreign_key;
use crate::features::shared::validation::{validate_rating, FieldValidationError};

pub const REVIEW_MAX_LENGTH: usize = 5000;

const USER_FOREIGN_KEY: &str = "reviews_user_id_fkey";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddReviewCommand {
    #[serde(skip)]
    pub book_id: i64,
    pub username: String,
    pub rating: i32,
    #[serde(default)]
    pub review: String,
}

pub type AddReviewResponse = ReviewItem;

type InsertedReview = (i64, String, i16, DateTime<Utc>);

#[derive(Debug, thiserror::Error)]
pub enum AddReviewError {
    #[error("{0}")]
    Validation(#[from] FieldValidationError),
    #[error("Username is required and cannot be empty")]
    UsernameRequired,
    #[error("Review must be at most 5000 characters")]
    ReviewTooLong,
    #[error("User '{0}' not found")]
    UserNotFound(String),
    #[error("Book not found with id: {0}")]
    BookNotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AddReviewError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::UsernameRequired | Self::ReviewTooLong => {
                ErrorKind::Validation
            },
            Self::UserNotFound(_) | Self::BookNotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl Request<Result<AddReviewResponse, AddReviewError>> for AddReviewCommand {}

impl AddReviewCommand {
    pub fn validate(&self) -> Result<(), AddReviewError> {
        if self.username.trim().is_empty() {
            return Err(AddReviewError::UsernameRequired);
        }
        validate_rating(self.rating)?;
        if self.review.chars().count() > REVIEW_MAX_LENGTH {
            return Err(AddReviewError::ReviewTooLong);
        }
        Ok(())
    }

    /// Rating narrowed to the column type; only valid after `validate`
    fn rating_value(&self) -> i16 {
        i16::try_from(self.rating).unwrap_or_default()
    }
}

#[tracing::instrument(
    skip(pool, command),
    fields(book_id = command.book_id, username = %command.username)
)]
pub async fn handle(
    pool: PgPool,
    command: AddReviewCommand,
) -> Result<AddReviewResponse, AddReviewError> {
    command.validate()?;

    let mut tx = pool.begin().await?;

    // Held until commit so the user cannot be deleted under the insert
    let user_id: i64 =
        sqlx::query_scalar("SELECT id FROM users WHERE username = $1 FOR SHARE")
            .bind(&command.username)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AddReviewError::UserNotFound(command.username.clone()))?;

    let (id, review, rating, created_at) = sqlx::query_as::<_, InsertedReview>(
        r#"
        INSERT INTO reviews (book_id, user_id, rating, review)
        VALUES ($1, $2, $3, $4)
        RETURNING id, review, rating, created_at
        "#,
    )
    .bind(command.book_id)
    .bind(user_id)
    .bind(command.rating_value())
    .bind(command.review.trim())
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| insert_error(e, &command))?;

    tx.commit().await?;

    tracing::info!(review_id = id, rating, "Review added");

    Ok(ReviewItem {
        id,
        review,
        rating,
        created_at,
        user: ReviewUser {
            username: command.username,
        },
    })
}

fn insert_error(error: sqlx::Error, command: &AddReviewCommand) -> AddReviewError {
    match violated_foreign_key(&error) {
        Some(USER_FOREIGN_KEY) => AddReviewError::UserNotFound(command.username.clone()),
        Some(_) => AddReviewError::BookNotFound(command.book_id),
        None => AddReviewError::Database(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(rating: i32) -> AddReviewCommand {
        AddReviewCommand {
            book_id: 1,
            username: "bilbo".to_string(),
            rating,
            review: "A fine tale".to_string(),
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(command(1).validate().is_ok());
        assert!(command(5).validate().is_ok());
        assert!(matches!(
            command(0).validate(),
            Err(AddReviewError::Validation(FieldValidationError::RatingRange))
        ));
        assert!(command(6).validate().is_err());
    }

    #[test]
    fn test_username_required() {
        let mut cmd = command(4);
        cmd.username = " ".to_string();
        assert!(matches!(cmd.validate(), Err(AddReviewError::UsernameRequired)));
    }

    #[test]
    fn test_book_id_comes_from_path() {
        let cmd: AddReviewCommand = serde_json::from_value(serde_json::json!({
            "book_id": 9,
            "username": "bilbo",
            "rating": 4
        }))
        .unwrap();
        assert_eq!(cmd.book_id, 0);
        assert_eq!(cmd.review, "");
        assert_eq!(cmd.rating_value(), 4);
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_adds_review(pool: PgPool) -> sqlx::Result<()> {
        TestUser::new("bilbo").insert(&pool).await?;
        let category = TestCategory::new("Fantasy").insert(&pool).await?;
        let book_id = TestBook::new(category, "The Hobbit").insert(&pool).await?;

        let review = handle(
            pool.clone(),
            AddReviewCommand {
                book_id,
                username: "bilbo".to_string(),
                rating: 5,
                review: "Wonderful".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(review.rating, 5);
        assert_eq!(review.user.username, "bilbo");
        assert_eq!(count_rows(&pool, "reviews").await?, 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_handle_unknown_user_or_book(pool: PgPool) -> sqlx::Result<()> {
        TestUser::new("bilbo").insert(&pool).await?;

        let unknown_book = handle(
            pool.clone(),
            AddReviewCommand {
                book_id: 99,
                username: "bilbo".to_string(),
                rating: 3,
                review: String::new(),
            },
        )
        .await;
        assert!(matches!(unknown_book, Err(AddReviewError::BookNotFound(99))));

        let unknown_user = handle(
            pool,
            AddReviewCommand {
                book_id: 99,
                username: "smaug".to_string(),
                rating: 3,
                review: String::new(),
            },
        )
        .await;
        assert!(matches!(unknown_user, Err(AddReviewError::UserNotFound(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_insert_error_names_the_missing_parent(pool: PgPool) -> sqlx::Result<()> {
        TestUser::new("bilbo").insert(&pool).await?;
        let category = TestCategory::new("Fantasy").insert(&pool).await?;
        let book_id = TestBook::new(category, "The Hobbit").insert(&pool).await?;
        let cmd = AddReviewCommand {
            book_id,
            username: "bilbo".to_string(),
            rating: 4,
            review: String::new(),
        };

        // user row gone: must not be reported as a missing book
        let missing_user = sqlx::query(
            "INSERT INTO reviews (book_id, user_id, rating, review) VALUES ($1, -1, 4, '')",
        )
        .bind(book_id)
        .execute(&pool)
        .await
        .unwrap_err();
        assert!(matches!(
            insert_error(missing_user, &cmd),
            AddReviewError::UserNotFound(name) if name == "bilbo"
        ));

        let user_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE username = 'bilbo'")
            .fetch_one(&pool)
            .await?;
        let missing_book = sqlx::query(
            "INSERT INTO reviews (book_id, user_id, rating, review) VALUES (-1, $1, 4, '')",
        )
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap_err();
        assert!(matches!(
            insert_error(missing_book, &cmd),
            AddReviewError::BookNotFound(id) if id == book_id
        ));
        Ok(())
    }
}
