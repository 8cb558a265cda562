//! Error handling for the BlogHub client.
//!
//! | Category | Source | Reaches the network |
//! |----------|--------|---------------------|
//! | Network | transport failure | yes |
//! | Server | error envelope from the API | yes |
//! | NotFound | empty lookup result | yes |
//! | Validation | form checks in the views | no |
//! | Storage | local session file | no |
//!
//! Views never propagate these further: they turn them into a message with
//! [`ApiError::user_message`] and keep it as view-local state.

mod api;
mod category;

pub use api::{extract_server_message, ApiError};
pub use category::ErrorCategory;

/// Result type for API layer operations.
pub type ApiResult<T> = Result<T, ApiError>;
