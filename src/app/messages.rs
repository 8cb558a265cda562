//! AppMessage enum for async communication within the application.

use crate::error::ApiResult;
use crate::models::{Comment, Post, User};
use crate::views::RequestGeneration;

/// Which auth form started a session request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Login,
    Register,
}

/// Results reported back by spawned fetch tasks.
///
/// Every variant carries the generation the request was issued under so
/// the receiving view can drop results it no longer wants.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Listing page fetched
    PostsLoaded {
        generation: RequestGeneration,
        result: ApiResult<Vec<Post>>,
    },
    /// Slug lookup for the detail view finished
    PostLoaded {
        generation: RequestGeneration,
        result: ApiResult<Option<Post>>,
    },
    /// Comment create call finished
    CommentSubmitted {
        generation: RequestGeneration,
        result: ApiResult<Comment>,
    },
    /// Authoritative comment list fetched
    CommentsRefreshed {
        generation: RequestGeneration,
        result: ApiResult<Vec<Comment>>,
    },
    /// Login or registration finished; the session has already moved
    AuthCompleted {
        kind: AuthKind,
        generation: RequestGeneration,
        result: ApiResult<User>,
    },
}
