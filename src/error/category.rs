//! Error category classification.
//!
//! Groups every failure the client can hit into the four cases the views
//! distinguish, plus local storage problems.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport failure: connection refused, DNS, TLS, dropped socket.
    Network,

    /// The server answered with an application error (validation, bad
    /// credentials, 5xx). The body may carry a human-readable message.
    Server,

    /// The lookup succeeded but matched nothing.
    NotFound,

    /// Client-side form validation rejected the input before any request.
    Validation,

    /// Local persistent storage could not be read or written.
    Storage,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Storage => "storage",
        }
    }

    /// Returns suggested recovery actions for this category.
    ///
    /// Nothing is retried automatically; every hint asks the user to act.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Server => "Check your input and submit again",
            ErrorCategory::NotFound => "Go back to the listing and pick another post",
            ErrorCategory::Validation => "Fill in every field and try again",
            ErrorCategory::Storage => "Check permissions on the ~/.bloghub directory",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
