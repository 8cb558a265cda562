//! Common test utilities for integration tests.
//!
//! [`Harness`] wires a real [`App`] to a wiremock server through the
//! production reqwest adapter and a file store in a temp dir, exactly as
//! `main` does.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use bloghub::adapters::{FileStorage, ReqwestHttpClient};
use bloghub::api::{ApiClient, AuthApi, ContentApi};
use bloghub::app::App;
use bloghub::config::ClientConfig;
use bloghub::session::{SessionStore, TOKEN_KEY, USER_KEY};
use bloghub::traits::KeyValueStore;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::MockServer;

/// A post record shaped like the `populate=*` response.
pub fn post_json(id: i64, slug: &str, title: &str) -> Value {
    json!({
        "id": id,
        "documentId": format!("doc-{}", id),
        "title": title,
        "slug": slug,
        "excerpt": format!("Excerpt for {}", title),
        "content": format!("<p>Body of {}</p>", title),
        "updatedAt": "2025-03-01T10:00:00.000Z",
        "publishedAt": "2025-03-01T10:00:00.000Z",
        "category": { "id": 1, "name": "Tech", "slug": "tech" },
        "author": { "id": 1, "name": "Jane Writer" },
        "tags": [],
        "coverImage": null,
        "comments": []
    })
}

pub fn comment_json(id: i64, name: &str, message: &str) -> Value {
    json!({
        "id": id,
        "userName": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "message": message,
        "approved": true,
        "createdAt": "2025-03-02T09:00:00.000Z"
    })
}

pub fn demo_user_json() -> Value {
    json!({ "id": 1, "username": "demo", "email": "demo@example.com" })
}

/// An App talking to `server` with its session file in a temp dir.
pub struct Harness {
    pub app: App,
    pub storage: Arc<FileStorage>,
    _dir: TempDir,
}

impl Harness {
    pub async fn new(server: &MockServer) -> Self {
        Self::build(server, |_| {}).await
    }

    /// Start signed in as the demo user with token `token`.
    pub async fn signed_in(server: &MockServer, token: &str) -> Self {
        let user = demo_user_json().to_string();
        let token = token.to_string();
        Self::build(server, move |storage| {
            storage.set(TOKEN_KEY, &token).unwrap();
            storage.set(USER_KEY, &user).unwrap();
        })
        .await
    }

    async fn build(server: &MockServer, seed: impl FnOnce(&FileStorage)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::new()
            .with_api_url(format!("{}/api", server.uri()))
            .with_image_origin(server.uri())
            .with_app_dir(dir.path());

        let storage = Arc::new(FileStorage::at(config.storage_path()));
        seed(&storage);

        let store: Arc<dyn KeyValueStore> = storage.clone();
        let client = Arc::new(ApiClient::new(
            config.api_url.clone(),
            Arc::new(ReqwestHttpClient::new()),
            store.clone(),
        ));
        let content = Arc::new(ContentApi::new(client.clone()));
        let session = Arc::new(SessionStore::restore(AuthApi::new(client), store));

        Self {
            app: App::new(config, content, session),
            storage,
            _dir: dir,
        }
    }

    /// Wait for the next async result and hand it to the app.
    pub async fn pump(&mut self) {
        let rx = self.app.message_rx.as_mut().expect("receiver owned by app");
        let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for app message")
            .expect("message channel closed");
        self.app.handle_message(msg);
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.storage.get(key).unwrap()
    }
}

/// Render the app into a TestBackend and return the screen text.
pub fn screen_text(app: &App, width: u16, height: u16) -> String {
    use ratatui::{backend::TestBackend, Terminal};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| bloghub::ui::render(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
