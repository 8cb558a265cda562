//! UI rendering for BlogHub
//!
//! Every frame is the shell (header and footer) around the view for the
//! current route:
//! - Listing: a responsive grid of post cards
//! - Detail: the article, its comments, and the comment form
//! - Login / Register: a centered form dialog
//!
//! Rendering is a pure function of [`App`]; nothing here mutates state.
//! Every string that came from the server is passed through
//! [`crate::markup`] sanitizers before it reaches the buffer.

mod auth_forms;
pub mod components;
mod detail;
mod helpers;
pub mod listing;
mod shell;
pub mod theme;

pub use detail::PENDING_MARKER;
pub use helpers::{spinner_frame, truncate_string};
pub use shell::{BRAND, COPYRIGHT, TAGLINE};

use ratatui::Frame;

use crate::app::{App, Route};

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the UI based on current route
pub fn render(frame: &mut Frame, app: &App) {
    let body = shell::render(frame, frame.area(), app);
    match app.route {
        Route::Listing => listing::render(frame, body, app),
        Route::Detail { .. } => detail::render(frame, body, app),
        Route::Login => auth_forms::render_login(frame, body, app),
        Route::Register => auth_forms::render_register(frame, body, app),
    }
}
