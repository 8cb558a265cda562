//! Content access layer: posts and comments.
//!
//! Each operation maps to exactly one request. Nothing here validates input
//! or retries; callers decide how failures surface.

use std::sync::Arc;

use super::client::ApiClient;
use super::query::{Query, SortKey};
use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::{ApiError, ApiResult};
use crate::models::{Comment, Envelope, NewComment, Post};

/// Parameters for [`ContentApi::list_posts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub page_size: u32,
    pub sort: SortKey,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortKey::newest_first(),
        }
    }
}

impl ListOptions {
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Typed access to the `/posts` and `/comments` collections.
#[derive(Debug, Clone)]
pub struct ContentApi {
    client: Arc<ApiClient>,
}

impl ContentApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Fetch one page of posts with relations expanded, in server order.
    pub async fn list_posts(&self, options: &ListOptions) -> ApiResult<Vec<Post>> {
        let query = Query::new()
            .populate_all()
            .limit(options.page_size)
            .sort(&options.sort);
        let envelope: Envelope<Vec<Post>> = self.client.get("/posts", &query).await?;
        Ok(envelope.into_inner())
    }

    /// Look a post up by slug. An empty result is `Ok(None)`, not an error.
    pub async fn get_post_by_slug(&self, slug: &str) -> ApiResult<Option<Post>> {
        let query = Query::new().filter_eq(&["slug"], slug).populate_all();
        let envelope: Envelope<Vec<Post>> = self.client.get("/posts", &query).await?;
        Ok(envelope.into_inner().into_iter().next())
    }

    /// Fetch a post by numeric id. A 404 becomes [`ApiError::NotFound`].
    pub async fn get_post_by_id(&self, id: i64) -> ApiResult<Post> {
        let path = format!("/posts/{}", id);
        match self
            .client
            .get::<Envelope<Post>>(&path, &Query::new().populate_all())
            .await
        {
            Ok(envelope) => Ok(envelope.into_inner()),
            Err(ApiError::Server { status: 404, .. }) => Err(ApiError::NotFound {
                resource: format!("Post {}", id),
            }),
            Err(e) => Err(e),
        }
    }

    /// Create a comment. The server decides moderation state.
    pub async fn create_comment(&self, comment: &NewComment) -> ApiResult<Comment> {
        let envelope: Envelope<Comment> = self
            .client
            .post("/comments", &Envelope::new(comment))
            .await?;
        Ok(envelope.into_inner())
    }

    /// Authoritative comment list for one post.
    pub async fn list_comments_for_post(&self, post_id: i64) -> ApiResult<Vec<Comment>> {
        let query = Query::new()
            .filter_eq(&["post", "id"], post_id)
            .populate_all();
        let envelope: Envelope<Vec<Comment>> = self.client.get("/comments", &query).await?;
        Ok(envelope.into_inner())
    }
}
