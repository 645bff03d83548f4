pub mod add;

pub use add::{AddListenHistoryCommand, AddListenHistoryError, AddListenHistoryResponse};
