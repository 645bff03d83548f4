//! Per-user listening history

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{AddListenHistoryCommand, AddListenHistoryError};
pub use queries::{ListListenHistoryError, ListListenHistoryQuery};
pub use routes::listen_history_routes;
pub use types::ListenHistoryItem;
