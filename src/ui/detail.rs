//! Single post: article, comment thread, and the comment form.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use super::components::{calculate_input_field_height, render_input_field, InputFieldConfig};
use super::helpers::spinner_frame;
use super::theme::{
    COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_LINK, COLOR_PENDING,
};
use crate::app::App;
use crate::markup::{sanitize, sanitize_inline};
use crate::models::Post;
use crate::views::detail::NO_COMMENTS;
use crate::views::{CommentEntry, DetailPhase, DetailView};

pub const PENDING_MARKER: &str = "(awaiting confirmation)";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    match app.detail.phase() {
        DetailPhase::Loading => render_centered(
            frame,
            area,
            vec![Line::from(Span::styled(
                format!("{} Loading...", spinner_frame(app.tick_count)),
                Style::default().fg(COLOR_DIM),
            ))],
        ),
        DetailPhase::NotFound(message) => render_centered(
            frame,
            area,
            vec![
                Line::from(Span::styled(
                    "404",
                    Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(message, Style::default().fg(COLOR_DIM))),
                Line::default(),
                Line::from(Span::styled("[b] Browse Blogs", Style::default().fg(COLOR_LINK))),
            ],
        ),
        DetailPhase::Error(message) => render_centered(
            frame,
            area,
            vec![
                Line::from(Span::styled(
                    "Error",
                    Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(message, Style::default().fg(COLOR_DIM))),
                Line::default(),
                Line::from(Span::styled("[b] Browse Blogs", Style::default().fg(COLOR_LINK))),
            ],
        ),
        DetailPhase::Loaded { post, body } => render_loaded(frame, area, &app.detail, post, body),
    }
}

fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
    let height = (lines.len() as u16).min(area.height);
    let y = area.y + area.height.saturating_sub(height) / 3;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect { y, height, ..area },
    );
}

fn render_loaded(frame: &mut Frame, area: Rect, view: &DetailView, post: &Post, body: &[String]) {
    let article_area = if view.is_editing() {
        let [article, form] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(form_height(view)),
        ])
        .areas(area);
        render_comment_form(frame, form, view);
        article
    } else {
        area
    };

    let lines = article_lines(view, post, body);
    let article = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((view.scroll(), 0));
    let margin = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..article_area
    };
    frame.render_widget(article, margin);
}

/// Everything above the form, in reading order.
fn article_lines<'a>(view: &'a DetailView, post: &'a Post, body: &'a [String]) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        sanitize_inline(&post.title),
        Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
    )));

    let mut meta = Vec::new();
    if let Some(author) = post.author_name() {
        meta.push(format!("By {}", sanitize_inline(author)));
    }
    if let Some(date) = post.display_published_at() {
        meta.push(date.format("%B %-d, %Y").to_string());
    }
    if let Some(category) = post.category_name() {
        meta.push(sanitize_inline(category));
    }
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(
            meta.join(" \u{2022} "),
            Style::default().fg(COLOR_DIM),
        )));
    }

    let tags = post.tag_names();
    if !tags.is_empty() {
        let spans: Vec<Span> = tags
            .iter()
            .map(|tag| Span::styled(format!("#{} ", sanitize_inline(tag)), Style::default().fg(COLOR_LINK)))
            .collect();
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    lines.extend(body.iter().map(|line| Line::from(line.as_str())));

    if let Some(author) = &post.author {
        let bio = sanitize(&author.bio_text());
        if !bio.trim().is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("About {}", sanitize_inline(&author.name)),
                Style::default().fg(COLOR_HEADER),
            )));
            lines.extend(bio.lines().map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(COLOR_DIM)))));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("Comments ({})", view.comments().len()),
        Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());

    if view.comments().is_empty() {
        lines.push(Line::from(Span::styled(NO_COMMENTS, Style::default().fg(COLOR_DIM))));
    } else {
        for entry in view.comments() {
            lines.extend(comment_lines(entry));
        }
    }

    if !view.is_editing() {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Leave a Comment", Style::default().fg(COLOR_HEADER)),
            Span::styled("  [c]", Style::default().fg(COLOR_DIM)),
        ]));
        if let Some(error) = view.form_error() {
            lines.push(Line::from(Span::styled(
                format!("\u{2717} {}", error),
                Style::default().fg(COLOR_ERROR),
            )));
        }
    }

    lines
}

fn comment_lines(entry: &CommentEntry) -> Vec<Line<'static>> {
    let comment = &entry.comment;
    let mut header = vec![Span::styled(
        sanitize_inline(&comment.user_name),
        Style::default().fg(COLOR_ACTIVE).add_modifier(Modifier::BOLD),
    )];
    if let Some(at) = comment.created_at {
        header.push(Span::styled(
            format!("  {}", at.format("%b %-d, %Y")),
            Style::default().fg(COLOR_DIM),
        ));
    }
    if entry.is_pending() {
        header.push(Span::styled(
            format!("  {}", PENDING_MARKER),
            Style::default().fg(COLOR_PENDING),
        ));
    }

    let mut lines = vec![Line::from(header)];
    lines.extend(
        sanitize(&comment.message)
            .lines()
            .map(|l| Line::from(format!("  {}", l))),
    );
    lines.push(Line::default());
    lines
}

fn form_height(view: &DetailView) -> u16 {
    let fields: u16 = view
        .form()
        .fields()
        .iter()
        .map(|field| calculate_input_field_height(&InputFieldConfig::from_field(field)))
        .sum();
    // Borders, title row, error or status row
    fields + 4
}

fn render_comment_form(frame: &mut Frame, area: Rect, view: &DetailView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(" Leave a Comment ", Style::default().fg(COLOR_HEADER)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut y = inner.y;
    let bottom = inner.y + inner.height;
    for (index, field) in view.form().fields().iter().enumerate() {
        if y >= bottom {
            break;
        }
        let config = InputFieldConfig::from_field(field).focused(index == view.form().focus());
        let slot = Rect {
            y,
            height: bottom - y,
            ..inner
        };
        y += render_input_field(frame, slot, &config);
    }

    if y < bottom {
        let status = match view.form_error() {
            Some(error) => Span::styled(format!("  \u{2717} {}", error), Style::default().fg(COLOR_ERROR)),
            None if view.is_submitting() => {
                Span::styled("  Posting...", Style::default().fg(COLOR_DIM))
            }
            None => Span::styled("  [Enter] Post Comment", Style::default().fg(COLOR_DIM)),
        };
        frame.render_widget(Paragraph::new(Line::from(status)), Rect { y, height: 1, ..inner });
    }
}
