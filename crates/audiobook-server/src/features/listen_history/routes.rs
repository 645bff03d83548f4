//! Listening history API routes
//!
//! - `POST /api/v1/listen-history` - Record a playback entry
//! - `GET /api/v1/listen-history/:username` - A user's history, most recent first

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use crate::api::response::{error_response, ApiResponse, ErrorKind};

use super::{
    commands::{AddListenHistoryCommand, AddListenHistoryError},
    queries::{ListListenHistoryError, ListListenHistoryQuery},
};

pub fn listen_history_routes() -> Router<PgPool> {
    Router::new()
        .route("/", post(add_entry))
        .route("/:username", get(list_entries))
}

#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
async fn add_entry(
    State(pool): State<PgPool>,
    Json(command): Json<AddListenHistoryCommand>,
) -> Result<Response, ListenHistoryApiError> {
    let response = super::commands::add::handle(pool, command).await?;
    Ok(ApiResponse::success(response).with_status(StatusCode::CREATED))
}

#[tracing::instrument(skip(pool, query), fields(username = %username))]
async fn list_entries(
    State(pool): State<PgPool>,
    Path(username): Path<String>,
    Query(mut query): Query<ListListenHistoryQuery>,
) -> Result<Response, ListenHistoryApiError> {
    query.username = username;

    let response = super::queries::list_for_user::handle(pool, query).await?;

    let meta = json!({
        "pagination": response.pagination
    });

    Ok(ApiResponse::success_with_meta(response.items, meta).into_response())
}

#[derive(Debug, thiserror::Error)]
enum ListenHistoryApiError {
    #[error(transparent)]
    Add(#[from] AddListenHistoryError),
    #[error(transparent)]
    List(#[from] ListListenHistoryError),
}

impl ListenHistoryApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Add(e) => e.kind(),
            Self::List(e) => e.kind(),
        }
    }
}

impl IntoResponse for ListenHistoryApiError {
    fn into_response(self) -> Response {
        error_response(self.kind(), &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/audiobook_unreachable")
            .unwrap();
        listen_history_routes().with_state(pool)
    }

    #[tokio::test]
    async fn test_add_requires_fields() {
        let body = serde_json::json!({
            "username": "bilbo",
            "titleOfBook": "",
            "titleOfChapter": "One",
            "audioUrl": "a.mp3",
            "nameOfAudio": "a",
            "time": "0"
        });
        let response = app()
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_rejects_page_zero() {
        let response = app()
            .oneshot(Request::get("/bilbo?page=0").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
