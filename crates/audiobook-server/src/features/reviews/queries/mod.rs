pub mod book_stats;
pub mod list_for_book;
pub mod stats;

pub use book_stats::{BookReviewStatsError, BookReviewStatsQuery, BookReviewStatsResponse};
pub use list_for_book::{ListBookReviewsError, ListBookReviewsQuery, ListBookReviewsResponse};
pub use stats::{ReviewStatsError, ReviewStatsResponse};
