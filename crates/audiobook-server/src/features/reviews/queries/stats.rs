use sqlx::PgPool;

use crate::api::response::ErrorKind;
use crate::features::reviews::types::{load_stats, ReviewStats};

pub type ReviewStatsResponse = ReviewStats;

#[derive(Debug, thiserror::Error)]
pub enum ReviewStatsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ReviewStatsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

/// Statistics over every review in the catalog
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<ReviewStatsResponse, ReviewStatsError> {
    Ok(load_stats(&pool, None).await?)
}
