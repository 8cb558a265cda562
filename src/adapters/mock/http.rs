//! Mock HTTP client for testing.
//!
//! Returns predefined responses or errors and records every request so
//! tests can assert on URLs, headers and bodies without network access.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET or POST)
    pub method: String,
    /// Request URL including the query string
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for POST requests)
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

/// Mock HTTP client for testing.
///
/// Responses are matched by exact URL first, then by the longest configured
/// prefix, then by the default response.
///
/// # Example
///
/// ```ignore
/// use bloghub::adapters::mock::{MockHttpClient, MockResponse};
/// use bloghub::traits::{HttpClient, Headers, Response};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "https://api.example.com/posts",
///     MockResponse::Success(Response::json_body(200, &serde_json::json!({"data": []}))),
/// );
///
/// let response = client.get("https://api.example.com/posts?populate=*", &Headers::new()).await?;
/// assert_eq!(response.status, 200);
/// assert_eq!(client.get_requests().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a URL or URL prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Shorthand for a JSON response with the given status.
    pub fn set_json(&self, url: &str, status: u16, body: serde_json::Value) {
        self.set_response(url, MockResponse::Success(Response::json_body(status, &body)));
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests with the given method.
    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.get_requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        let longest_prefix = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len());
        if let Some((_, response)) = longest_prefix {
            return Some(response.clone());
        }

        let default = self.default_response.lock().unwrap();
        default.clone()
    }

    fn respond(&self, url: &str) -> Result<Response, HttpError> {
        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);
        self.respond(url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.respond(url)
    }
}
