//! Feature modules implementing the audiobook API
//!
//! Each feature is a vertical slice with its own commands, queries and routes.
//!
//! # Features
//!
//! - **users**: Registration, login, profile and password management
//! - **categories**: Book categories with book counts
//! - **books**: Catalog listing, featured books, book detail with chapters
//! - **chapters**: Chapter text and its audio files
//! - **audios**: Audio files attached to chapters
//! - **reviews**: Ratings and reviews, per book and overall statistics
//! - **listen_history**: Per-user playback history
//! - **my_audio**: Audio clips saved by users
//! - **files**: Media uploads to S3-compatible storage
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations (create, update, delete)
//! - `queries/` - Read operations (get, list, stats)
//! - `routes.rs` - HTTP route definitions
//! - `types.rs` - Shared records and response shapes (if needed)
//!
//! Commands and queries are marked with `mediator::Request`, naming the
//! result their `handle` function produces. Routes call `handle` directly.

pub mod audios;
pub mod books;
pub mod categories;
pub mod chapters;
pub mod files;
pub mod listen_history;
pub mod my_audio;
pub mod reviews;
pub mod shared;
pub mod users;

use crate::storage::Storage;
use axum::Router;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// PostgreSQL connection pool for database operations
    pub db: sqlx::PgPool,
    /// S3-compatible storage backend for uploads
    pub storage: Storage,
}

/// Creates the API router with all feature routes mounted
///
/// - `/users` - Accounts
/// - `/categories` - Categories
/// - `/books` - Books, plus `/books/:id/reviews`
/// - `/chapters` - Chapters
/// - `/audios` - Chapter audio files
/// - `/reviews` - Review deletion and statistics
/// - `/listen-history` - Listening history
/// - `/my-audio` - Saved audio clips
/// - `/files` - Uploads
pub fn router(state: FeatureState) -> Router<()> {
    let books = books::books_routes().merge(reviews::book_reviews_routes());

    Router::new()
        .nest("/users", users::users_routes().with_state(state.db.clone()))
        .nest("/categories", categories::categories_routes().with_state(state.db.clone()))
        .nest("/books", books.with_state(state.db.clone()))
        .nest("/chapters", chapters::chapters_routes().with_state(state.db.clone()))
        .nest("/audios", audios::audios_routes().with_state(state.db.clone()))
        .nest("/reviews", reviews::reviews_routes().with_state(state.db.clone()))
        .nest(
            "/listen-history",
            listen_history::listen_history_routes().with_state(state.db.clone()),
        )
        .nest("/my-audio", my_audio::my_audio_routes().with_state(state.db))
        .nest("/files", files::files_routes().with_state(state.storage))
}
