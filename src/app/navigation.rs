//! Navigation and fetch spawning for the App.

use std::sync::Arc;
use tracing::{debug, info};

use super::{App, AppMessage, AuthKind, Route};
use crate::api::ListOptions;
use crate::views::{LoginSubmission, RegisterSubmission, RequestGeneration};

impl App {
    /// Switch views. The old view stops listening for its requests and the
    /// new one starts its own.
    pub fn navigate(&mut self, route: Route) {
        self.leave_current();
        info!(from = %self.route, to = %route, "Navigating");
        self.route = route;
        self.enter_current();
        self.mark_dirty();
    }

    fn leave_current(&mut self) {
        match self.route {
            Route::Listing => self.listing.leave(),
            Route::Detail { .. } => self.detail.leave(),
            Route::Login => self.login.leave(),
            Route::Register => self.register.leave(),
        }
    }

    fn enter_current(&mut self) {
        match self.route.clone() {
            Route::Listing => {
                let generation = self.listing.begin_load();
                self.spawn_list_posts(generation);
            }
            Route::Detail { slug } => {
                let generation = self.detail.load(&slug);
                self.spawn_fetch_post(slug, generation);
            }
            Route::Login => self.login.reset(),
            Route::Register => self.register.reset(),
        }
    }

    /// Re-run the visible view's fetch.
    pub fn reload(&mut self) {
        match &self.route {
            Route::Listing | Route::Detail { .. } => self.enter_current(),
            Route::Login | Route::Register => {}
        }
        self.mark_dirty();
    }

    /// Open the post under the listing cursor.
    pub fn open_selected(&mut self) {
        if let Some(slug) = self.listing.selected_post().map(|p| p.slug.clone()) {
            self.navigate(Route::Detail { slug });
        }
    }

    /// Drop the session and return to the listing.
    pub fn logout(&mut self) {
        self.session().logout();
        self.navigate(Route::Listing);
    }

    pub fn submit_comment(&mut self) {
        match self.detail.begin_submit() {
            Ok((comment, generation)) => {
                let content = Arc::clone(&self.content);
                let tx = self.message_tx.clone();
                tokio::spawn(async move {
                    let result = content.create_comment(&comment).await;
                    let _ = tx.send(AppMessage::CommentSubmitted { generation, result });
                });
            }
            Err(e) => debug!("Comment not submitted: {}", e),
        }
        self.mark_dirty();
    }

    /// Fetch the authoritative comment list for the open post.
    pub fn refresh_comments(&mut self) {
        let Some((post_id, generation)) = self.detail.begin_refresh() else {
            return;
        };
        let content = Arc::clone(&self.content);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = content.list_comments_for_post(post_id).await;
            let _ = tx.send(AppMessage::CommentsRefreshed { generation, result });
        });
    }

    pub fn submit_login(&mut self) {
        match self.login.begin_submit() {
            Ok((LoginSubmission { identifier, password }, generation)) => {
                let session = Arc::clone(&self.session);
                let tx = self.message_tx.clone();
                tokio::spawn(async move {
                    let result = session.login(&identifier, &password).await;
                    let _ = tx.send(AppMessage::AuthCompleted {
                        kind: AuthKind::Login,
                        generation,
                        result,
                    });
                });
            }
            Err(e) => debug!("Login not submitted: {}", e),
        }
        self.mark_dirty();
    }

    pub fn submit_register(&mut self) {
        match self.register.begin_submit() {
            Ok((submission, generation)) => {
                let RegisterSubmission {
                    username,
                    email,
                    password,
                } = submission;
                let session = Arc::clone(&self.session);
                let tx = self.message_tx.clone();
                tokio::spawn(async move {
                    let result = session.register(&username, &email, &password).await;
                    let _ = tx.send(AppMessage::AuthCompleted {
                        kind: AuthKind::Register,
                        generation,
                        result,
                    });
                });
            }
            Err(e) => debug!("Registration not submitted: {}", e),
        }
        self.mark_dirty();
    }

    fn spawn_list_posts(&self, generation: RequestGeneration) {
        let content = Arc::clone(&self.content);
        let tx = self.message_tx.clone();
        let options = ListOptions::default().with_page_size(self.config.page_size);
        tokio::spawn(async move {
            let result = content.list_posts(&options).await;
            let _ = tx.send(AppMessage::PostsLoaded { generation, result });
        });
    }

    fn spawn_fetch_post(&self, slug: String, generation: RequestGeneration) {
        let content = Arc::clone(&self.content);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = content.get_post_by_slug(&slug).await;
            let _ = tx.send(AppMessage::PostLoaded { generation, result });
        });
    }
}
