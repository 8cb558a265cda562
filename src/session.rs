//! Process-wide authentication session.
//!
//! The store is constructed once in `main` and handed to [`crate::app::App`]
//! as an `Arc`. It mirrors two keys in local storage:
//!
//! - `token`: the bearer credential, read by [`crate::api::ApiClient`] on
//!   every request
//! - `user`: the authenticated [`User`] as a JSON string
//!
//! Every transition is a single write-lock swap taken after any network
//! I/O has finished, so readers never observe a half-applied session.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

use crate::api::AuthApi;
use crate::error::{ApiError, ApiResult};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::traits::{KeyValueStore, StorageError};

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the serialized user.
pub const USER_KEY: &str = "user";

/// Who the client is acting as.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated { user: User, token: String },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated { user, .. } => Some(user),
            SessionState::Anonymous => None,
        }
    }
}

/// Session state plus the operations that move it.
pub struct SessionStore {
    auth: AuthApi,
    storage: Arc<dyn KeyValueStore>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Rehydrate from storage without contacting the server.
    ///
    /// A stored token whose user cannot be read yields `Anonymous`.
    pub fn restore(auth: AuthApi, storage: Arc<dyn KeyValueStore>) -> Self {
        let state = match Self::read_persisted(storage.as_ref()) {
            Ok(Some((user, token))) => {
                info!(username = %user.username, "Restored session");
                SessionState::Authenticated { user, token }
            }
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                warn!("Ignoring persisted session: {}", e);
                SessionState::Anonymous
            }
        };

        Self {
            auth,
            storage,
            state: RwLock::new(state),
        }
    }

    fn read_persisted(
        storage: &dyn KeyValueStore,
    ) -> Result<Option<(User, String)>, StorageError> {
        let token = match storage.get(TOKEN_KEY)? {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(None),
        };
        let raw_user = storage
            .get(USER_KEY)?
            .ok_or_else(|| StorageError::Serialization("token present without user".to_string()))?;
        let user: User = serde_json::from_str(&raw_user)?;
        Ok(Some((user, token)))
    }

    /// Cloned copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user().cloned()
    }

    pub fn token(&self) -> Option<String> {
        match &*self.read() {
            SessionState::Authenticated { token, .. } => Some(token.clone()),
            SessionState::Anonymous => None,
        }
    }

    /// Authenticate with an email-or-username and password.
    ///
    /// On failure the state is left untouched and the error returned.
    pub async fn login(&self, identifier: &str, password: &str) -> ApiResult<User> {
        let request = LoginRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };
        let response = self.auth.login(&request).await.map_err(|e| {
            warn!("Login failed: {}", e);
            e
        })?;
        self.establish(response)
    }

    /// Create an account and sign in as it.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> ApiResult<User> {
        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.auth.register(&request).await.map_err(|e| {
            warn!("Registration failed: {}", e);
            e
        })?;
        self.establish(response)
    }

    /// Drop the session. Always ends `Anonymous`, even if storage fails.
    pub fn logout(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, "Failed to clear stored session key: {}", e);
            }
        }
        *self.write() = SessionState::Anonymous;
        info!("Logged out");
    }

    fn establish(&self, response: AuthResponse) -> ApiResult<User> {
        let AuthResponse { jwt, user } = response;
        self.persist(&user, &jwt).map_err(|e| {
            warn!("Failed to persist session: {}", e);
            ApiError::from(e)
        })?;

        info!(username = %user.username, "Session established");
        *self.write() = SessionState::Authenticated {
            user: user.clone(),
            token: jwt,
        };
        Ok(user)
    }

    fn persist(&self, user: &User, token: &str) -> Result<(), StorageError> {
        let raw_user = serde_json::to_string(user)?;
        self.storage.set(TOKEN_KEY, token)?;
        if let Err(e) = self.storage.set(USER_KEY, &raw_user) {
            // Never leave a token behind without its user.
            let _ = self.storage.remove(TOKEN_KEY);
            return Err(e);
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
