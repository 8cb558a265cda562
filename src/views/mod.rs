//! View models.
//!
//! Each view is a plain state machine: it issues a request generation when
//! a fetch starts, accepts the tagged result, and exposes a render phase.
//! None of them perform I/O; [`crate::app::App`] spawns the fetches.

pub mod detail;
pub mod form;
pub mod listing;
pub mod login;
pub mod register;
pub mod request;

pub use detail::{CommentEntry, ConfirmationState, DetailPhase, DetailView};
pub use form::{FieldSet, TextField};
pub use listing::{ListingPhase, ListingView, PostSummary};
pub use login::{LoginSubmission, LoginView};
pub use register::{RegisterSubmission, RegisterView};
pub use request::{RequestGeneration, RequestTracker};

use thiserror::Error;

use crate::error::ErrorCategory;

/// Client-side form rejections. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Submission already in progress")]
    AlreadySubmitting,
}

/// What an auth view did with a session result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Superseded or abandoned; nothing changed
    Stale,
    Succeeded,
    Failed,
}

impl FormError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}
