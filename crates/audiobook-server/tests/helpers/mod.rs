//! Shared helpers for the router-level integration tests
//!
//! Apps are built from the real router. [`lazy_app`] never reaches a database,
//! so only requests that fail before touching SQL return meaningful results.

#![allow(dead_code)]

use audiobook_server::{
    api::{create_router, AppState},
    config::{Config, DatabaseConfig},
    db,
    storage::{config::StorageConfig, Storage},
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Storage client pointed at a port nothing listens on
pub fn test_storage() -> Storage {
    Storage::new(StorageConfig::for_minio("http://127.0.0.1:9", "audiobook-test"))
}

/// Full application router backed by `pool`
pub fn test_app(pool: PgPool) -> Router {
    create_router(
        AppState {
            db: pool,
            storage: test_storage(),
        },
        &Config::default(),
    )
}

/// Full application router whose pool points at an unreachable database
pub fn lazy_app() -> Router {
    let config = DatabaseConfig {
        url: "postgresql://audiobook@127.0.0.1:1/audiobook_unreachable".to_string(),
        min_connections: 0,
        connect_timeout_secs: 1,
        ..Config::default().database
    };
    test_app(db::create_lazy_pool(&config).unwrap())
}

/// Send a request and decode the JSON body (`Null` for an empty body)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, json_request("POST", uri, body)).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, json_request("PUT", uri, body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
