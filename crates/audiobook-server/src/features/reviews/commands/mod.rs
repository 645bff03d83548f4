pub mod add;
pub mod delete;

pub use add::{AddReviewCommand, AddReviewError, AddReviewResponse};
pub use delete::{DeleteReviewCommand, DeleteReviewError, DeleteReviewResponse};
