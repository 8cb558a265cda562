//! Local-provider authentication endpoints.

use std::sync::Arc;

use super::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};

/// `POST /auth/local` and `POST /auth/local/register`.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exchange an email-or-username and password for a token.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.client.post("/auth/local", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.client.post("/auth/local/register", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryStorage, MockHttpClient};
    use serde_json::json;

    fn auth_api() -> (AuthApi, MockHttpClient) {
        let http = MockHttpClient::new();
        let client = ApiClient::new(
            "http://api.test/api",
            Arc::new(http.clone()),
            Arc::new(InMemoryStorage::new()),
        );
        (AuthApi::new(Arc::new(client)), http)
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let (api, http) = auth_api();
        http.set_json(
            "http://api.test/api/auth/local",
            200,
            json!({ "jwt": "abc", "user": { "id": 1, "username": "demo", "email": "demo@example.com" } }),
        );

        let response = api
            .login(&LoginRequest {
                identifier: "demo@example.com".to_string(),
                password: "password".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.jwt, "abc");
        let body = http.requests_with_method("POST")[0].json_body().unwrap();
        assert_eq!(body["identifier"], "demo@example.com");
    }

    #[tokio::test]
    async fn test_register_error_message() {
        let (api, http) = auth_api();
        http.set_json(
            "http://api.test/api/auth/local/register",
            400,
            json!({ "error": { "status": 400, "name": "ApplicationError", "message": "Email or Username are already taken" } }),
        );

        let err = api
            .register(&RegisterRequest {
                username: "demo".to_string(),
                email: "demo@example.com".to_string(),
                password: "password".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.server_message(), Some("Email or Username are already taken"));
    }
}
