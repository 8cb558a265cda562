//! Message handling for the App.

use super::{App, AppMessage, AuthKind, Route};
use crate::views::AuthOutcome;

impl App {
    /// Handle an incoming async message.
    ///
    /// Each view decides for itself whether the result is still wanted.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::PostsLoaded { generation, result } => {
                self.listing.apply_posts(generation, result);
            }
            AppMessage::PostLoaded { generation, result } => {
                self.detail.apply_post(generation, result);
            }
            AppMessage::CommentSubmitted { generation, result } => {
                self.detail.apply_comment_result(generation, result);
            }
            AppMessage::CommentsRefreshed { generation, result } => {
                self.detail.apply_refresh(generation, result);
            }
            AppMessage::AuthCompleted {
                kind,
                generation,
                result,
            } => {
                let outcome = match kind {
                    AuthKind::Login => self.login.apply_result(generation, &result),
                    AuthKind::Register => self.register.apply_result(generation, &result),
                };
                if outcome == AuthOutcome::Succeeded {
                    self.navigate(Route::Listing);
                }
            }
        }
    }

    /// Drain every message already queued, without waiting.
    pub fn drain_messages(&mut self) -> usize {
        let Some(mut rx) = self.message_rx.take() else {
            return 0;
        };
        let mut handled = 0;
        while let Ok(msg) = rx.try_recv() {
            self.handle_message(msg);
            handled += 1;
        }
        self.message_rx = Some(rx);
        handled
    }
}
