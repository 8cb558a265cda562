//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Route`] - Which view is currently displayed
//! - [`AppMessage`] - Results reported back by spawned fetch tasks
//!
//! The App owns every view model and is driven from a single task. Network
//! calls run in `tokio::spawn`ed tasks that hold only `Arc` handles and a
//! clone of `message_tx`.

mod handlers;
mod keys;
mod messages;
mod navigation;
mod route;

pub use messages::{AppMessage, AuthKind};
pub use route::Route;

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::api::ContentApi;
use crate::config::ClientConfig;
use crate::session::SessionStore;
use crate::views::{DetailPhase, DetailView, ListingView, LoginView, RegisterView};

/// Main application state
pub struct App {
    /// Current view
    pub route: Route,
    pub listing: ListingView,
    pub detail: DetailView,
    pub login: LoginView,
    pub register: RegisterView,
    /// Runtime configuration (image origin, page size)
    pub config: ClientConfig,
    /// Content API (shared across async tasks)
    content: Arc<ContentApi>,
    /// Session store (shared across async tasks)
    session: Arc<SessionStore>,
    /// Flag to track if the app should quit
    pub should_quit: bool,
    /// Receiver for async messages
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (clone this to pass to async tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Tick counter for animations (loading spinner, cursor blink)
    pub tick_count: u64,
    /// Dirty flag: when true, the UI needs to be redrawn.
    pub needs_redraw: bool,
}

impl App {
    /// Create the app. Nothing is fetched until [`App::start`] or the first
    /// [`App::navigate`].
    pub fn new(config: ClientConfig, content: Arc<ContentApi>, session: Arc<SessionStore>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        Self {
            route: Route::default(),
            listing: ListingView::new(),
            detail: DetailView::new(),
            login: LoginView::new(),
            register: RegisterView::new(),
            config,
            content,
            session,
            should_quit: false,
            message_rx: Some(message_rx),
            message_tx,
            tick_count: 0,
            needs_redraw: true,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Mount the initial route.
    pub fn start(&mut self, route: Route) {
        self.navigate(route);
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Advance animations. Only something loading needs a redraw.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.is_loading() {
            self.mark_dirty();
        }
    }

    /// Whether the visible view is waiting on a request.
    pub fn is_loading(&self) -> bool {
        match self.route {
            Route::Listing => self.listing.is_loading(),
            Route::Detail { .. } => {
                self.detail.phase() == DetailPhase::Loading || self.detail.is_submitting()
            }
            Route::Login => self.login.is_submitting(),
            Route::Register => self.register.is_submitting(),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
