//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST)
//! - [`KeyValueStore`] - Local persistent storage for the session

pub mod http;
pub mod storage;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use storage::{KeyValueStore, StorageError};
