//! Book reviews and rating statistics

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{AddReviewCommand, AddReviewError, DeleteReviewCommand, DeleteReviewError};
pub use queries::{BookReviewStatsQuery, ListBookReviewsQuery};
pub use routes::{book_reviews_routes, reviews_routes};
pub use types::{RatingCounts, ReviewItem, ReviewStats};
