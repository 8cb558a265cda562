use serde::{Deserialize, Serialize};

/// The authenticated account as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Body of `POST /auth/local`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Email or username
    pub identifier: String,
    pub password: String,
}

/// Body of `POST /auth/local/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Successful response of both auth endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub jwt: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_deserialize() {
        let json = r#"{
            "jwt": "abc",
            "user": {
                "id": 3,
                "documentId": "u3",
                "username": "demo",
                "email": "demo@example.com",
                "provider": "local",
                "confirmed": true,
                "blocked": false
            }
        }"#;

        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.jwt, "abc");
        assert_eq!(response.user.id, 3);
        assert_eq!(response.user.username, "demo");
        assert_eq!(response.user.email, "demo@example.com");
    }

    #[test]
    fn test_login_request_serialize() {
        let body = serde_json::to_value(LoginRequest {
            identifier: "demo@example.com".to_string(),
            password: "password".to_string(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "identifier": "demo@example.com", "password": "password" })
        );
    }
}
