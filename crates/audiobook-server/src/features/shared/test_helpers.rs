//! Test helpers and fixtures for database tests
//!
//! # Examples
//!
//! ```rust,ignore
//! use audiobook_server::features::shared::test_helpers::*;
//!
//! #[sqlx::test(migrations = "../../migrations")]
//! async fn test_something(pool: PgPool) -> sqlx::Result<()> {
//!     let category = TestCategory::new("Fantasy").insert(&pool).await?;
//!     let book = TestBook::new(category, "The Hobbit").insert(&pool).await?;
//!     let chapter = TestChapter::new(book, "An Unexpected Party").insert(&pool).await?;
//!     // ... test logic ...
//!     Ok(())
//! }
//! ```

use sqlx::PgPool;

use crate::features::users::password::hash_password;

/// Password every [`TestUser`] is created with
pub const TEST_PASSWORD: &str = "secret123";

/// Builder for creating test users
#[derive(Debug, Clone)]
pub struct TestUser {
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub role: String,
}

impl TestUser {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            fullname: format!("{} Reader", username),
            email: format!("{}@example.com", username),
            role: "USER".to_string(),
        }
    }

    pub fn admin(mut self) -> Self {
        self.role = "ADMIN".to_string();
        self
    }

    /// Insert the user and return its id
    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<i64> {
        let password_hash = hash_password(TEST_PASSWORD)
            .await
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;

        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (username, password_hash, fullname, email, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&self.username)
        .bind(password_hash)
        .bind(&self.fullname)
        .bind(&self.email)
        .bind(&self.role)
        .fetch_one(pool)
        .await
    }
}

/// Builder for creating test categories
#[derive(Debug, Clone)]
pub struct TestCategory {
    pub name: String,
}

impl TestCategory {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>("INSERT INTO categories (name) VALUES ($1) RETURNING id")
            .bind(&self.name)
            .fetch_one(pool)
            .await
    }
}

/// Builder for creating test books
#[derive(Debug, Clone)]
pub struct TestBook {
    pub category_id: i64,
    pub title: String,
    pub author: String,
}

impl TestBook {
    pub fn new(category_id: i64, title: &str) -> Self {
        Self {
            category_id,
            title: title.to_string(),
            author: "J. R. R. Tolkien".to_string(),
        }
    }

    pub fn with_author(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO books (title, author, image, description, category_id)
            VALUES ($1, $2, 'cover.png', 'A test book', $3)
            RETURNING id
            "#,
        )
        .bind(&self.title)
        .bind(&self.author)
        .bind(self.category_id)
        .fetch_one(pool)
        .await
    }
}

/// Builder for creating test chapters
#[derive(Debug, Clone)]
pub struct TestChapter {
    pub book_id: i64,
    pub title: String,
}

impl TestChapter {
    pub fn new(book_id: i64, title: &str) -> Self {
        Self {
            book_id,
            title: title.to_string(),
        }
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO chapters (book_id, title_chapter, text)
            VALUES ($1, $2, 'Once upon a time')
            RETURNING id
            "#,
        )
        .bind(self.book_id)
        .bind(&self.title)
        .fetch_one(pool)
        .await
    }
}

/// Insert an audio row for a chapter and return its id
pub async fn insert_audio(pool: &PgPool, chapter_id: i64, name: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO audios (chapter_id, audio_name, audio_file)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(chapter_id)
    .bind(name)
    .bind(format!("https://media.example.com/{}.mp3", name))
    .fetch_one(pool)
    .await
}

/// Insert a review and return its id
pub async fn insert_review(
    pool: &PgPool,
    book_id: i64,
    user_id: i64,
    rating: i16,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO reviews (book_id, user_id, rating, review)
        VALUES ($1, $2, $3, 'Test review')
        RETURNING id
        "#,
    )
    .bind(book_id)
    .bind(user_id)
    .bind(rating)
    .fetch_one(pool)
    .await
}

/// Count rows in a table; `table` must be a trusted identifier
pub async fn count_rows(pool: &PgPool, table: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
}
