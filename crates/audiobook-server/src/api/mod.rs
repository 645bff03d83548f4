//! HTTP surface: the application router and health endpoint

pub mod response;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use std::{future::Future, future::IntoFuture, sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::Notify};
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::storage::Storage;
use crate::{db, features, middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub storage: Storage,
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState, config: &Config) -> Router {
    let feature_routes = features::router(features::FeatureState {
        db: state.db.clone(),
        storage: state.storage.clone(),
    });

    Router::new()
        .route("/health", get(health_check))
        .with_state(state)
        .nest("/api/v1", feature_routes)
        // Layers apply from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// Serve `app` until `signal` resolves, then drain open requests
///
/// Requests still running `drain_timeout` after the signal are dropped.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    signal: impl Future<Output = ()>,
    drain_timeout: Duration,
) -> std::io::Result<()> {
    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown({
            let shutdown = shutdown.clone();
            async move { shutdown.notified().await }
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result,
        _ = signal => {
            shutdown.notify_one();
            tracing::info!(
                timeout_secs = drain_timeout.as_secs_f64(),
                "Draining open connections"
            );
            match tokio::time::timeout(drain_timeout, &mut server).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!("Drain deadline reached, dropping open connections");
                    Ok(())
                },
            }
        },
    }
}

/// `GET /health` - `503` when the database does not answer
async fn health_check(State(state): State<AppState>) -> Response {
    match db::ping(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "database": "disconnected"
                })),
            )
                .into_response()
        },
    }
}
