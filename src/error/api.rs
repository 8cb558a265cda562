//! Errors returned by the content and auth API layers.

use serde::Deserialize;
use thiserror::Error;

use super::ErrorCategory;
use crate::traits::{HttpError, StorageError};

/// Failure of a call into the remote content API.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(#[from] HttpError),

    /// The server answered with a non-2xx status.
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server {
        status: u16,
        /// Message embedded in the error envelope, when the server sent one.
        message: Option<String>,
    },

    /// A 2xx body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// A direct lookup came back 404.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Persisting or reading the session failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// High-level category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Network(_) => ErrorCategory::Network,
            ApiError::Server { .. } | ApiError::Decode(_) => ErrorCategory::Server,
            ApiError::NotFound { .. } => ErrorCategory::NotFound,
            ApiError::Storage(_) => ErrorCategory::Storage,
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// The server's own error message, if one was embedded in the response.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Message to show in a view: the server's message when present, else
    /// the caller's static fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Build a server error from a status and a raw response body.
    pub fn from_response_body(status: u16, body: &[u8]) -> Self {
        ApiError::Server {
            status,
            message: extract_server_message(body),
        }
    }
}

/// Strapi error envelope: `{ "error": { "status", "name", "message" } }`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Pull `error.message` out of a response body, if it is there.
pub fn extract_server_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
}
