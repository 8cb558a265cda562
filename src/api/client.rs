//! Thin HTTP wrapper over the content API origin.
//!
//! Every outgoing request passes through [`ApiClient::authorization_headers`],
//! which reads the bearer token from local storage at send time. A token
//! written by a login is therefore picked up by the very next request, and a
//! logout stops credentials from being sent without any client rebuild.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::query::Query;
use crate::error::{ApiError, ApiResult};
use crate::session::TOKEN_KEY;
use crate::traits::{Headers, HttpClient, KeyValueStore, Response};

/// HTTP client bound to one API origin.
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    storage: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    /// Create a client for `base_url`. A trailing slash is dropped.
    pub fn new(
        base_url: impl Into<String>,
        http: Arc<dyn HttpClient>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            storage,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path plus query.
    pub fn url(&self, path: &str, query: &Query) -> String {
        let path = path.trim_start_matches('/');
        if query.is_empty() {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}/{}?{}", self.base_url, path, query.to_query_string())
        }
    }

    /// Headers for the next request.
    ///
    /// Adds `Authorization: Bearer <token>` when a token is stored. A
    /// storage read failure sends the request without credentials.
    pub fn authorization_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => {
                headers.insert("Authorization".to_string(), format!("Bearer {}", token));
            }
            Ok(_) => {}
            Err(e) => warn!("Could not read stored token, sending anonymously: {}", e),
        }

        headers
    }

    /// GET `path` with `query` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> ApiResult<T> {
        let url = self.url(path, query);
        let headers = self.authorization_headers();
        debug!(method = "GET", %url, "api request");

        let response = self.http.get(&url, &headers).await.map_err(|e| {
            warn!(method = "GET", %url, "request failed: {}", e);
            ApiError::from(e)
        })?;
        Self::decode("GET", &url, response)
    }

    /// POST a JSON `body` to `path` and decode the JSON response.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &Query::new());
        let headers = self.authorization_headers();
        let payload = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        debug!(method = "POST", %url, "api request");

        let response = self.http.post(&url, &payload, &headers).await.map_err(|e| {
            warn!(method = "POST", %url, "request failed: {}", e);
            ApiError::from(e)
        })?;
        Self::decode("POST", &url, response)
    }

    fn decode<T: DeserializeOwned>(method: &str, url: &str, response: Response) -> ApiResult<T> {
        if !response.is_success() {
            let err = ApiError::from_response_body(response.status, &response.body);
            warn!(method, url, status = response.status, "api error: {}", err);
            return Err(err);
        }

        response.json::<T>().map_err(|e| {
            warn!(method, url, "undecodable response: {}", e);
            ApiError::Decode(e.to_string())
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryStorage, MockHttpClient, MockResponse};
    use crate::traits::HttpError;

    const BASE: &str = "http://api.test/api";

    fn client_with(storage: InMemoryStorage) -> (ApiClient, MockHttpClient) {
        let http = MockHttpClient::new();
        let client = ApiClient::new(BASE, Arc::new(http.clone()), Arc::new(storage));
        (client, http)
    }

    #[test]
    fn test_url_building() {
        let (client, _) = client_with(InMemoryStorage::new());
        assert_eq!(client.url("/posts", &Query::new()), "http://api.test/api/posts");
        assert_eq!(
            client.url("posts", &Query::new().populate_all()),
            "http://api.test/api/posts?populate=*"
        );
    }

    #[test]
    fn test_trailing_slash_dropped() {
        let client = ApiClient::new(
            "http://api.test/api/",
            Arc::new(MockHttpClient::new()),
            Arc::new(InMemoryStorage::new()),
        );
        assert_eq!(client.base_url(), "http://api.test/api");
    }

    #[test]
    fn test_headers_without_token() {
        let (client, _) = client_with(InMemoryStorage::new());
        let headers = client.authorization_headers();
        assert!(!headers.contains_key("Authorization"));
        assert_eq!(headers.get("Content-Type").unwrap(), "application/json");
    }

    #[test]
    fn test_headers_with_token() {
        let (client, _) = client_with(InMemoryStorage::with_entries([(TOKEN_KEY, "abc")]));
        assert_eq!(client.authorization_headers().get("Authorization").unwrap(), "Bearer abc");
    }

    #[tokio::test]
    async fn test_token_is_read_per_request() {
        let storage = InMemoryStorage::new();
        let (client, http) = client_with(storage.clone());
        http.set_json("http://api.test/api/posts", 200, serde_json::json!({ "data": [] }));

        let _: serde_json::Value = client.get("/posts", &Query::new()).await.unwrap();
        storage.set(TOKEN_KEY, "late-token").unwrap();
        let _: serde_json::Value = client.get("/posts", &Query::new()).await.unwrap();

        let requests = http.get_requests();
        assert!(!requests[0].headers.contains_key("Authorization"));
        assert_eq!(
            requests[1].headers.get("Authorization").unwrap(),
            "Bearer late-token"
        );
    }

    #[tokio::test]
    async fn test_server_error_carries_message() {
        let (client, http) = client_with(InMemoryStorage::new());
        http.set_json(
            "http://api.test/api/auth/local",
            400,
            serde_json::json!({ "error": { "status": 400, "message": "Invalid identifier or password" } }),
        );

        let result: ApiResult<serde_json::Value> = client
            .post("/auth/local", &serde_json::json!({ "identifier": "x" }))
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.server_message(), Some("Invalid identifier or password"));
    }

    #[tokio::test]
    async fn test_transport_error_is_network() {
        let (client, http) = client_with(InMemoryStorage::new());
        http.set_response(
            "http://api.test/api/posts",
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );

        let result: ApiResult<serde_json::Value> = client.get("/posts", &Query::new()).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[tokio::test]
    async fn test_bad_json_is_decode_error() {
        let (client, http) = client_with(InMemoryStorage::new());
        http.set_response(
            "http://api.test/api/posts",
            MockResponse::Success(Response::new(200, bytes::Bytes::from("not json"))),
        );

        let result: ApiResult<serde_json::Value> = client.get("/posts", &Query::new()).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let (client, http) = client_with(InMemoryStorage::new());
        http.set_json("http://api.test/api/comments", 200, serde_json::json!({ "data": {} }));

        let _: serde_json::Value = client
            .post("/comments", &serde_json::json!({ "data": { "message": "hi" } }))
            .await
            .unwrap();

        let posts = http.requests_with_method("POST");
        assert_eq!(posts[0].json_body().unwrap()["data"]["message"], "hi");
    }
}
