//! Listing view: the newest posts as a grid of cards.

use tracing::{debug, warn};

use super::request::{RequestGeneration, RequestTracker};
use crate::app::Route;
use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::models::Post;

/// Placeholder cards drawn while the first page loads.
pub const SKELETON_CARDS: usize = 6;

pub const LOAD_ERROR: &str = "Failed to load blogs";
pub const EMPTY_MESSAGE: &str = "No blogs found. Check back soon!";

#[derive(Debug, Clone, PartialEq)]
enum ListingState {
    Loading,
    Failed(String),
    Loaded(Vec<Post>),
}

/// What the listing should draw, in priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListingPhase<'a> {
    Loading { skeletons: usize },
    Error(&'a str),
    Empty,
    Grid(&'a [Post]),
}

/// View model for the post listing.
#[derive(Debug)]
pub struct ListingView {
    requests: RequestTracker,
    state: ListingState,
    selected: usize,
}

impl Default for ListingView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingView {
    /// Starts in `Loading`; nothing is drawn until the first fetch lands.
    pub fn new() -> Self {
        Self {
            requests: RequestTracker::new(),
            state: ListingState::Loading,
            selected: 0,
        }
    }

    /// Enter the loading state and issue a generation for the fetch.
    pub fn begin_load(&mut self) -> RequestGeneration {
        self.state = ListingState::Loading;
        self.selected = 0;
        self.requests.issue()
    }

    /// Apply a fetch result. Returns `false` if it was stale and ignored.
    pub fn apply_posts(&mut self, generation: RequestGeneration, result: ApiResult<Vec<Post>>) -> bool {
        if !self.requests.complete(generation) {
            debug!(%generation, "Dropping stale listing response");
            return false;
        }

        self.state = match result {
            Ok(posts) => ListingState::Loaded(posts),
            Err(e) => {
                warn!("Failed to load posts: {}", e);
                ListingState::Failed(LOAD_ERROR.to_string())
            }
        };
        self.selected = 0;
        true
    }

    /// Drop interest in any outstanding fetch.
    pub fn leave(&mut self) {
        self.requests.invalidate();
    }

    pub fn phase(&self) -> ListingPhase<'_> {
        match &self.state {
            ListingState::Loading => ListingPhase::Loading {
                skeletons: SKELETON_CARDS,
            },
            ListingState::Failed(message) => ListingPhase::Error(message),
            ListingState::Loaded(posts) if posts.is_empty() => ListingPhase::Empty,
            ListingState::Loaded(posts) => ListingPhase::Grid(posts),
        }
    }

    /// Number of real post cards on screen.
    pub fn card_count(&self) -> usize {
        match self.phase() {
            ListingPhase::Grid(posts) => posts.len(),
            _ => 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListingState::Loading)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        let count = self.card_count();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_post(&self) -> Option<&Post> {
        match self.phase() {
            ListingPhase::Grid(posts) => posts.get(self.selected),
            _ => None,
        }
    }
}

/// Card content derived from a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub title: String,
    pub excerpt: String,
    pub category: Option<String>,
    pub author: Option<String>,
    /// Last-updated date, e.g. `Mar 1, 2025`
    pub date_label: Option<String>,
    pub image_url: String,
    pub route: Route,
}

impl PostSummary {
    pub fn from_post(post: &Post, config: &ClientConfig) -> Self {
        Self {
            title: post.title.clone(),
            excerpt: post.excerpt.clone().unwrap_or_default(),
            category: post.category_name().map(str::to_string),
            author: post.author_name().map(str::to_string),
            date_label: post
                .updated_at
                .map(|at| at.format("%b %-d, %Y").to_string()),
            image_url: config.image_url(post.cover_image_path()),
            route: Route::Detail {
                slug: post.slug.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::{Author, Category, Image};
    use crate::traits::HttpError;
    use chrono::{TimeZone, Utc};

    fn post(id: i64, slug: &str) -> Post {
        Post {
            id,
            title: format!("Post {}", id),
            slug: slug.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_loading_with_skeletons_and_no_cards() {
        let view = ListingView::new();
        assert_eq!(view.phase(), ListingPhase::Loading { skeletons: 6 });
        assert_eq!(view.card_count(), 0);
    }

    #[test]
    fn test_loaded_posts_become_cards() {
        let mut view = ListingView::new();
        let generation = view.begin_load();
        assert_eq!(view.card_count(), 0);

        let posts = vec![post(1, "a"), post(2, "b"), post(3, "c")];
        assert!(view.apply_posts(generation, Ok(posts)));

        assert_eq!(view.card_count(), 3);
        assert!(!view.is_loading());
    }

    #[test]
    fn test_empty_result_is_empty_not_grid() {
        let mut view = ListingView::new();
        let generation = view.begin_load();
        view.apply_posts(generation, Ok(vec![]));

        assert_eq!(view.phase(), ListingPhase::Empty);
        assert_eq!(view.card_count(), 0);
    }

    #[test]
    fn test_failure_shows_fixed_message() {
        let mut view = ListingView::new();
        let generation = view.begin_load();
        view.apply_posts(
            generation,
            Err(ApiError::Network(HttpError::Timeout("slow".to_string()))),
        );

        assert_eq!(view.phase(), ListingPhase::Error(LOAD_ERROR));
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut view = ListingView::new();
        let stale = view.begin_load();
        let fresh = view.begin_load();

        assert!(view.apply_posts(fresh, Ok(vec![post(1, "fresh")])));
        assert!(!view.apply_posts(stale, Ok(vec![])));

        assert_eq!(view.selected_post().unwrap().slug, "fresh");
    }

    #[test]
    fn test_response_after_leave_is_ignored() {
        let mut view = ListingView::new();
        let generation = view.begin_load();
        view.leave();
        assert!(!view.apply_posts(generation, Ok(vec![post(1, "a")])));
        assert!(view.is_loading());
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut view = ListingView::new();
        let generation = view.begin_load();
        view.apply_posts(generation, Ok(vec![post(1, "a"), post(2, "b")]));

        view.select_prev();
        assert_eq!(view.selected(), 0);
        view.select_next();
        view.select_next();
        assert_eq!(view.selected(), 1);
        assert_eq!(view.selected_post().unwrap().slug, "b");
    }

    #[test]
    fn test_summary_with_cover_image() {
        let config = ClientConfig::new();
        let post = Post {
            id: 1,
            title: "Hello".to_string(),
            slug: "hello-world".to_string(),
            excerpt: Some("Intro".to_string()),
            cover_image: Some(vec![Image {
                url: "/uploads/cover.png".to_string(),
                ..Default::default()
            }]),
            category: Some(Category {
                name: "Tech".to_string(),
                ..Default::default()
            }),
            author: Some(Author {
                name: "Ada".to_string(),
                ..Default::default()
            }),
            updated_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()),
            ..Default::default()
        };

        let summary = PostSummary::from_post(&post, &config);
        assert_eq!(
            summary.image_url,
            "https://blogapp-strapi.onrender.com/uploads/cover.png"
        );
        assert_eq!(summary.category.as_deref(), Some("Tech"));
        assert_eq!(summary.author.as_deref(), Some("Ada"));
        assert_eq!(summary.date_label.as_deref(), Some("Mar 1, 2025"));
        assert_eq!(
            summary.route,
            Route::Detail {
                slug: "hello-world".to_string()
            }
        );
    }

    #[test]
    fn test_summary_without_cover_uses_placeholder() {
        let summary = PostSummary::from_post(&post(1, "a"), &ClientConfig::new());
        assert_eq!(summary.image_url, "/blog-cover.png");
        assert!(summary.date_label.is_none());
    }
}
