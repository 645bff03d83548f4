//! Router tests that need no database
//!
//! Every request here is rejected by validation or routing before any SQL
//! runs, except the health check, which must report the unreachable database.

use axum::{body::Body, http::Request, http::StatusCode};
use serde_json::json;

mod helpers;
use helpers::*;

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let app = lazy_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = lazy_app();
    let (status, _) = get(&app, "/api/v1/publishers").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_error_envelope() {
    let app = lazy_app();
    let (status, body) = post_json(
        &app,
        "/api/v1/users/register",
        json!({
            "username": "ab",
            "password": "secret123",
            "fullname": "Bilbo Baggins",
            "email": "bilbo@shire.me"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Username"));
}

#[tokio::test]
async fn test_short_new_password_is_rejected() {
    let app = lazy_app();
    let (status, _) = put_json(
        &app,
        "/api/v1/users/bilbo/password",
        json!({ "oldPassword": "secret123", "newPassword": "123" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_category_name_is_rejected() {
    let app = lazy_app();
    let (status, _) = post_json(&app, "/api/v1/categories", json!({ "name": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_book_filters_are_validated() {
    let app = lazy_app();

    let (status, _) = get(&app, "/api/v1/books?min_rating=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/api/v1/books?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/api/v1/books/featured?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_rating_out_of_range() {
    let app = lazy_app();
    let (status, body) = post_json(
        &app,
        "/api/v1/books/1/reviews",
        json!({ "username": "bilbo", "rating": 0, "review": "meh" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Rating must be between 1 and 5");
}

#[tokio::test]
async fn test_chapter_update_needs_a_field() {
    let app = lazy_app();
    let (status, _) = put_json(&app, "/api/v1/chapters/1", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listen_history_requires_camel_case_fields() {
    let app = lazy_app();
    let (status, _) = post_json(
        &app,
        "/api/v1/listen-history",
        json!({
            "username": "bilbo",
            "title_of_book": "The Hobbit",
            "title_of_chapter": "One",
            "audio_url": "a.mp3",
            "name_of_audio": "a",
            "time": "0"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_upload_without_file_part() {
    let app = lazy_app();
    let boundary = "audiobook-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nThe Hobbit\r\n--{b}--\r\n",
        b = boundary
    );
    let request = Request::post("/api/v1/files")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_cors_preflight_allows_dev_origin() {
    let app = lazy_app();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/books")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-credentials")
            .unwrap(),
        "true"
    );
}
