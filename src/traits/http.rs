//! HTTP client trait abstraction.
//!
//! The content API talks to the network only through [`HttpClient`], so the
//! whole request pipeline can be exercised against a recording mock.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a response whose body is the serialized JSON value.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, Bytes::from(value.to_string()))
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client errors.
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Invalid URL
    InvalidUrl(String),
    /// Other transport error
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP client operations.
///
/// Status codes are not interpreted here: a 4xx/5xx comes back as an `Ok`
/// [`Response`]. Only transport failures are `Err`.
///
/// # Example
///
/// ```ignore
/// use bloghub::traits::{HttpClient, Headers};
///
/// async fn fetch<C: HttpClient>(client: &C) -> Result<String, HttpError> {
///     let response = client.get("https://api.example.com/posts", &Headers::new()).await?;
///     response.text().map_err(|e| HttpError::Other(e.to_string()))
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request. The URL already carries its query string.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a POST request with a string body.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;
}
