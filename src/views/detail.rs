//! Detail view: one post, its comments, and the comment form.
//!
//! Three kinds of request run against this view, each with its own
//! generation counter: the post lookup, comment submission, and the comment
//! refresh. [`DetailView::load`] bumps all three so nothing from a previous
//! slug can land on the new one.

use chrono::Utc;
use tracing::{debug, error, warn};

use super::form::{is_valid_email, FieldSet, TextField};
use super::request::{RequestGeneration, RequestTracker};
use super::FormError;
use crate::error::ApiResult;
use crate::markup;
use crate::models::{Comment, NewComment, Post};

pub const NOT_FOUND: &str = "Blog not found";
pub const LOAD_ERROR: &str = "Failed to load blog";
pub const COMMENT_ERROR: &str = "Failed to post comment";
pub const NO_COMMENTS: &str = "No comments yet. Be the first to comment!";

const NAME: usize = 0;
const EMAIL: usize = 1;
const MESSAGE: usize = 2;

/// Whether the server has acknowledged a visible comment in a list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationState {
    Confirmed,
    /// Accepted by the create call but not yet seen in a server list; it
    /// may still be held for moderation.
    PendingConfirmation,
}

/// A comment as shown in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentEntry {
    pub comment: Comment,
    pub state: ConfirmationState,
}

impl CommentEntry {
    pub fn confirmed(comment: Comment) -> Self {
        Self {
            comment,
            state: ConfirmationState::Confirmed,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == ConfirmationState::PendingConfirmation
    }
}

#[derive(Debug, Clone, PartialEq)]
enum DetailState {
    Loading,
    NotFound,
    Failed,
    Loaded {
        post: Box<Post>,
        body: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailPhase<'a> {
    Loading,
    NotFound(&'static str),
    Error(&'static str),
    Loaded { post: &'a Post, body: &'a [String] },
}

/// View model for a single post.
#[derive(Debug)]
pub struct DetailView {
    slug: Option<String>,
    state: DetailState,
    comments: Vec<CommentEntry>,
    form: FieldSet,
    editing: bool,
    submitting: bool,
    submitted: Option<NewComment>,
    form_error: Option<String>,
    scroll: u16,
    post_requests: RequestTracker,
    comment_requests: RequestTracker,
    refresh_requests: RequestTracker,
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new()
    }
}

fn comment_form() -> FieldSet {
    FieldSet::new(vec![
        TextField::new("Name", "Your Name"),
        TextField::new("Email", "Your Email"),
        TextField::new("Message", "Share your thoughts..."),
    ])
}

impl DetailView {
    pub fn new() -> Self {
        Self {
            slug: None,
            state: DetailState::Loading,
            comments: Vec::new(),
            form: comment_form(),
            editing: false,
            submitting: false,
            submitted: None,
            form_error: None,
            scroll: 0,
            post_requests: RequestTracker::new(),
            comment_requests: RequestTracker::new(),
            refresh_requests: RequestTracker::new(),
        }
    }

    /// Reset for `slug` and issue the generation for its lookup.
    pub fn load(&mut self, slug: &str) -> RequestGeneration {
        self.slug = Some(slug.to_string());
        self.state = DetailState::Loading;
        self.comments.clear();
        self.form = comment_form();
        self.editing = false;
        self.submitting = false;
        self.submitted = None;
        self.form_error = None;
        self.scroll = 0;
        self.comment_requests.invalidate();
        self.refresh_requests.invalidate();
        self.post_requests.issue()
    }

    /// Drop interest in every outstanding request.
    pub fn leave(&mut self) {
        self.post_requests.invalidate();
        self.comment_requests.invalidate();
        self.refresh_requests.invalidate();
        self.submitting = false;
        self.editing = false;
    }

    /// Apply the slug lookup. Returns `false` if the result was stale.
    pub fn apply_post(&mut self, generation: RequestGeneration, result: ApiResult<Option<Post>>) -> bool {
        if !self.post_requests.complete(generation) {
            debug!(%generation, "Dropping stale post response");
            return false;
        }

        match result {
            Ok(Some(post)) => {
                self.comments = post
                    .comments
                    .iter()
                    .cloned()
                    .map(CommentEntry::confirmed)
                    .collect();
                let body = markup::to_plain_lines(post.content.as_deref().unwrap_or(""));
                self.state = DetailState::Loaded {
                    post: Box::new(post),
                    body,
                };
            }
            Ok(None) => {
                debug!(slug = ?self.slug, "No post matches slug");
                self.state = DetailState::NotFound;
            }
            Err(e) => {
                warn!(slug = ?self.slug, "Failed to load post: {}", e);
                self.state = DetailState::Failed;
            }
        }
        true
    }

    pub fn phase(&self) -> DetailPhase<'_> {
        match &self.state {
            DetailState::Loading => DetailPhase::Loading,
            DetailState::NotFound => DetailPhase::NotFound(NOT_FOUND),
            DetailState::Failed => DetailPhase::Error(LOAD_ERROR),
            DetailState::Loaded { post, body } => DetailPhase::Loaded {
                post: &**post,
                body: body.as_slice(),
            },
        }
    }

    pub fn post(&self) -> Option<&Post> {
        match &self.state {
            DetailState::Loaded { post, .. } => Some(&**post),
            _ => None,
        }
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn comments(&self) -> &[CommentEntry] {
        &self.comments
    }

    pub fn form(&self) -> &FieldSet {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FieldSet {
        &mut self.form
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Focus the comment form. Only possible once the post is loaded.
    pub fn start_editing(&mut self) {
        self.editing = self.post().is_some();
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Validate the form and hand back the payload to send.
    ///
    /// Blank fields (or no loaded post to attach to), a malformed email and
    /// a submission in flight are rejected without touching the network.
    pub fn begin_submit(&mut self) -> Result<(NewComment, RequestGeneration), FormError> {
        if self.submitting {
            return Err(FormError::AlreadySubmitting);
        }

        let post_id = match self.post().map(|post| post.id) {
            Some(id) if !self.form.any_blank() => id,
            _ => {
                self.form_error = Some(FormError::MissingFields.to_string());
                return Err(FormError::MissingFields);
            }
        };
        if !is_valid_email(self.form.value(EMAIL)) {
            self.form_error = Some(FormError::InvalidEmail.to_string());
            return Err(FormError::InvalidEmail);
        }

        let comment = NewComment {
            user_name: self.form.value(NAME).trim().to_string(),
            email: self.form.value(EMAIL).trim().to_string(),
            message: self.form.value(MESSAGE).trim().to_string(),
            id: post_id,
        };

        self.submitting = true;
        self.form_error = None;
        self.submitted = Some(comment.clone());
        Ok((comment, self.comment_requests.issue()))
    }

    /// Apply the create-comment result.
    ///
    /// Success appends a pending local copy of what was submitted and
    /// clears the form. Failure keeps the form as typed.
    pub fn apply_comment_result(&mut self, generation: RequestGeneration, result: ApiResult<Comment>) -> bool {
        if !self.comment_requests.complete(generation) {
            debug!(%generation, "Dropping stale comment response");
            return false;
        }
        self.submitting = false;
        let submitted = self.submitted.take();

        match (result, submitted) {
            (Ok(_), Some(submitted)) => {
                self.comments.push(CommentEntry {
                    comment: Comment::local_shadow(&submitted, Utc::now()),
                    state: ConfirmationState::PendingConfirmation,
                });
                self.form.clear_all();
                self.form_error = None;
                self.editing = false;
            }
            (Ok(_), None) => {
                warn!("Comment accepted with no submission on record");
            }
            (Err(e), _) => {
                error!(slug = ?self.slug, "Failed to submit comment: {}", e);
                self.form_error = Some(COMMENT_ERROR.to_string());
            }
        }
        true
    }

    /// Issue a refresh of the comment list for the loaded post.
    pub fn begin_refresh(&mut self) -> Option<(i64, RequestGeneration)> {
        let post_id = self.post()?.id;
        Some((post_id, self.refresh_requests.issue()))
    }

    pub fn apply_refresh(&mut self, generation: RequestGeneration, result: ApiResult<Vec<Comment>>) -> bool {
        if !self.refresh_requests.complete(generation) {
            debug!(%generation, "Dropping stale comment refresh");
            return false;
        }
        match result {
            Ok(comments) => self.reconcile(comments),
            Err(e) => warn!(slug = ?self.slug, "Failed to refresh comments: {}", e),
        }
        true
    }

    /// Replace the visible list with the server's. Pending local copies the
    /// server does not return (yet) are dropped.
    pub fn reconcile(&mut self, server_comments: Vec<Comment>) {
        let dropped = self.comments.iter().filter(|c| c.is_pending()).count();
        if dropped > 0 {
            debug!(dropped, "Replacing pending comments with server list");
        }
        self.comments = server_comments
            .into_iter()
            .map(CommentEntry::confirmed)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::traits::HttpError;

    fn comment(name: &str, message: &str) -> Comment {
        serde_json::from_value(serde_json::json!({ "id": 1, "userName": name, "message": message }))
            .unwrap()
    }

    fn loaded_view(comments: Vec<Comment>) -> DetailView {
        let mut view = DetailView::new();
        let generation = view.load("hello-world");
        let post = Post {
            id: 4,
            title: "Hello".to_string(),
            slug: "hello-world".to_string(),
            content: Some("<p>Body</p>".to_string()),
            comments,
            ..Default::default()
        };
        assert!(view.apply_post(generation, Ok(Some(post))));
        view
    }

    fn fill_form(view: &mut DetailView, name: &str, email: &str, message: &str) {
        view.form_mut().set_value(NAME, name);
        view.form_mut().set_value(EMAIL, email);
        view.form_mut().set_value(MESSAGE, message);
    }

    #[test]
    fn test_load_seeds_confirmed_comments() {
        let view = loaded_view(vec![comment("Ada", "Hi")]);
        assert_eq!(view.comments().len(), 1);
        assert_eq!(view.comments()[0].state, ConfirmationState::Confirmed);
        match view.phase() {
            DetailPhase::Loaded { post, body } => {
                assert_eq!(post.id, 4);
                assert_eq!(body, ["Body"]);
            }
            other => panic!("unexpected phase {:?}", other),
        }
    }

    #[test]
    fn test_zero_matches_is_not_found() {
        let mut view = DetailView::new();
        let generation = view.load("missing");
        view.apply_post(generation, Ok(None));
        assert_eq!(view.phase(), DetailPhase::NotFound("Blog not found"));
    }

    #[test]
    fn test_failure_is_error_phase() {
        let mut view = DetailView::new();
        let generation = view.load("x");
        view.apply_post(
            generation,
            Err(ApiError::Network(HttpError::ConnectionFailed("down".to_string()))),
        );
        assert_eq!(view.phase(), DetailPhase::Error("Failed to load blog"));
    }

    #[test]
    fn test_previous_slug_response_is_dropped() {
        let mut view = DetailView::new();
        let first = view.load("first");
        let _second = view.load("second");

        let stale = Post {
            id: 1,
            slug: "first".to_string(),
            ..Default::default()
        };
        assert!(!view.apply_post(first, Ok(Some(stale))));
        assert_eq!(view.phase(), DetailPhase::Loading);
        assert_eq!(view.slug(), Some("second"));
    }

    #[test]
    fn test_blank_field_rejected() {
        let mut view = loaded_view(vec![]);
        fill_form(&mut view, "Ada", "", "Hello");

        assert_eq!(view.begin_submit().unwrap_err(), FormError::MissingFields);
        assert!(!view.is_submitting());
        assert_eq!(view.form_error(), Some("Please fill in all fields"));
    }

    #[test]
    fn test_malformed_email_issues_no_request() {
        let mut view = loaded_view(vec![]);
        fill_form(&mut view, "Ada", "not-an-email", "Hi");

        assert_eq!(view.begin_submit().unwrap_err(), FormError::InvalidEmail);
        assert!(!view.is_submitting());
        assert_eq!(view.form_error(), Some("Please enter a valid email address"));
        assert_eq!(view.form().value(MESSAGE), "Hi");

        view.form_mut().set_value(EMAIL, "ada@example.com");
        assert!(view.begin_submit().is_ok());
    }

    #[test]
    fn test_submit_before_load_rejected() {
        let mut view = DetailView::new();
        view.load("x");
        fill_form(&mut view, "Ada", "ada@example.com", "Hello");
        assert_eq!(view.begin_submit().unwrap_err(), FormError::MissingFields);
    }

    #[test]
    fn test_double_submit_rejected() {
        let mut view = loaded_view(vec![]);
        fill_form(&mut view, "Ada", "ada@example.com", "Hello");

        let (payload, _) = view.begin_submit().unwrap();
        assert_eq!(payload.id, 4);
        assert_eq!(view.begin_submit().unwrap_err(), FormError::AlreadySubmitting);
    }

    #[test]
    fn test_successful_comment_appends_one_pending_entry() {
        let mut view = loaded_view(vec![comment("Grace", "First")]);
        fill_form(&mut view, "Ada", "ada@example.com", "Hello");

        let (_, generation) = view.begin_submit().unwrap();
        assert!(view.apply_comment_result(generation, Ok(comment("Ada", "Hello"))));

        assert_eq!(view.comments().len(), 2);
        let added = &view.comments()[1];
        assert!(added.is_pending());
        assert_eq!(added.comment.user_name, "Ada");
        assert_eq!(added.comment.message, "Hello");
        assert!(added.comment.created_at.is_some());
        assert!(view.form().fields().iter().all(|f| f.value.is_empty()));
        assert!(!view.is_submitting());
    }

    #[test]
    fn test_failed_comment_keeps_form() {
        let mut view = loaded_view(vec![]);
        fill_form(&mut view, "Ada", "ada@example.com", "Hello");

        let (_, generation) = view.begin_submit().unwrap();
        view.apply_comment_result(
            generation,
            Err(ApiError::Server {
                status: 500,
                message: None,
            }),
        );

        assert!(view.comments().is_empty());
        assert_eq!(view.form().value(MESSAGE), "Hello");
        assert_eq!(view.form_error(), Some(COMMENT_ERROR));
        assert!(!view.is_submitting());
    }

    #[test]
    fn test_reconcile_replaces_pending_with_server_list() {
        let mut view = loaded_view(vec![]);
        fill_form(&mut view, "Ada", "ada@example.com", "Hello");
        let (_, generation) = view.begin_submit().unwrap();
        view.apply_comment_result(generation, Ok(comment("Ada", "Hello")));
        assert!(view.comments()[0].is_pending());

        let (post_id, refresh) = view.begin_refresh().unwrap();
        assert_eq!(post_id, 4);
        view.apply_refresh(refresh, Ok(vec![comment("Ada", "Hello"), comment("Bob", "Yo")]));

        assert_eq!(view.comments().len(), 2);
        assert!(view.comments().iter().all(|c| !c.is_pending()));
    }

    #[test]
    fn test_comment_response_after_navigation_is_dropped() {
        let mut view = loaded_view(vec![]);
        fill_form(&mut view, "Ada", "ada@example.com", "Hello");
        let (_, generation) = view.begin_submit().unwrap();

        view.load("other");
        assert!(!view.apply_comment_result(generation, Ok(comment("Ada", "Hello"))));
        assert!(view.comments().is_empty());
    }
}
