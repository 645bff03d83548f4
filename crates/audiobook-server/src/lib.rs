//! Audiobook Server Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! HTTP backend for an audiobook platform.
//!
//! # Overview
//!
//! The server provides a REST API under `/api/v1` for:
//!
//! - **Accounts**: registration, login, profiles and passwords
//! - **Catalog**: categories, books, chapters and their audio files
//! - **Reviews**: ratings per book and aggregate statistics
//! - **Listening**: per-user listening history and saved audio clips
//! - **Uploads**: media files stored in S3-compatible object storage
//!
//! # Architecture
//!
//! Every operation is a vertical slice under [`features`]:
//!
//! - **Commands** (write operations) validate the request, run their SQL
//!   (inside a transaction when several statements are involved) and return a
//!   response DTO.
//! - **Queries** (read operations) push pagination, filtering and aggregation
//!   into SQL.
//!
//! Each command and query owns a `thiserror` enum whose `kind()` decides the
//! HTTP status; see [`api::response::ErrorKind`].
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework
//! - **SQLx**: PostgreSQL access and migrations
//! - **Tower**: middleware (tracing, CORS, compression)
//! - **AWS SDK**: S3-compatible storage
//!
//! # Example
//!
//! ```no_run
//! use audiobook_server::{
//!     api::{create_router, AppState},
//!     config::Config,
//!     db,
//!     storage::{config::StorageConfig, Storage},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let db = db::create_pool(&config.database).await?;
//!     let storage = Storage::new(StorageConfig::from_env());
//!     let app = create_router(AppState { db, storage }, &config);
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod features;
pub mod middleware;
pub mod storage;
