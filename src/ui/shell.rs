//! Header and footer drawn around every view.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_HEADER};
use crate::app::{App, Route};
use crate::markup::sanitize_inline;

pub const BRAND: &str = "BlogHub";
pub const TAGLINE: &str = "Share your thoughts and ideas with the world.";
pub const COPYRIGHT: &str = "\u{00a9} 2025 BlogHub. All rights reserved.";

const HEADER_HEIGHT: u16 = 2;
const FOOTER_HEIGHT: u16 = 3;

/// Draw the shell and return the area left for the view.
pub fn render(frame: &mut Frame, area: Rect, app: &App) -> Rect {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);

    render_header(frame, header, app);
    render_footer(frame, footer, app);
    body
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let brand = Line::from(vec![
        Span::styled(
            format!(" {}", BRAND),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", app.route.path()), Style::default().fg(COLOR_DIM)),
    ]);
    let account = account_line(app);
    let [left, right] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(account.width() as u16),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(brand), left);
    frame.render_widget(Paragraph::new(account).alignment(Alignment::Right), right);
}

/// Right side of the header: who is signed in and how to change it.
fn account_line(app: &App) -> Line<'static> {
    match app.session().user() {
        Some(user) => Line::from(vec![
            Span::styled(sanitize_inline(&user.username), Style::default().fg(COLOR_ACTIVE)),
            Span::styled("  [L]ogout ", Style::default().fg(COLOR_DIM)),
        ]),
        None => Line::from(Span::styled(
            "[l] Login  [s] Sign Up ",
            Style::default().fg(COLOR_DIM),
        )),
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", BRAND), Style::default().fg(COLOR_HEADER)),
            Span::styled(TAGLINE, Style::default().fg(COLOR_DIM)),
            Span::styled(format!("  {}", COPYRIGHT), Style::default().fg(COLOR_DIM)),
        ]),
        Line::from(Span::styled(
            format!(" {}", key_hints(app)),
            Style::default().fg(COLOR_DIM),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn key_hints(app: &App) -> &'static str {
    match app.route {
        Route::Listing => "[\u{2191}\u{2193}] select  [Enter] read  [r] reload  [q] quit",
        Route::Detail { .. } if app.detail.is_editing() => {
            "[Tab] next field  [Enter] post comment  [Esc] stop editing"
        }
        Route::Detail { .. } => {
            "[\u{2191}\u{2193}] scroll  [c] comment  [r] refresh comments  [b] back  [q] quit"
        }
        Route::Login => "[Tab] next field  [Enter] sign in  [Ctrl-S] sign up  [Esc] back",
        Route::Register => "[Tab] next field  [Enter] create account  [Ctrl-L] sign in  [Esc] back",
    }
}
