//! Post listing: a grid of cards, or skeletons while the page loads.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::helpers::{spinner_frame, truncate_string, wrap_words};
use super::theme::{
    COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_LINK, COLOR_SKELETON,
};
use crate::app::App;
use crate::markup::sanitize_inline;
use crate::views::{ListingPhase, PostSummary};

pub const HEADING: &str = "Latest Articles";

/// Rows per card, borders included.
const CARD_HEIGHT: u16 = 8;

/// Columns for a given width: three on wide terminals, one on narrow.
pub fn column_count(width: u16) -> u16 {
    match width {
        w if w >= 120 => 3,
        w if w >= 80 => 2,
        _ => 1,
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if area.height < 2 {
        return;
    }
    let heading = Line::from(vec![
        Span::styled(
            format!(" {}", HEADING),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            if app.listing.is_loading() {
                format!("  {}", spinner_frame(app.tick_count))
            } else {
                String::new()
            },
            Style::default().fg(COLOR_DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(heading), Rect { height: 1, ..area });

    let grid = Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    };

    match app.listing.phase() {
        ListingPhase::Loading { skeletons } => render_skeletons(frame, grid, skeletons),
        ListingPhase::Error(message) => render_notice(frame, grid, message, COLOR_ERROR),
        ListingPhase::Empty => render_notice(frame, grid, crate::views::listing::EMPTY_MESSAGE, COLOR_DIM),
        ListingPhase::Grid(posts) => {
            let summaries: Vec<PostSummary> = posts
                .iter()
                .map(|post| PostSummary::from_post(post, &app.config))
                .collect();
            render_cards(frame, grid, &summaries, app.listing.selected());
        }
    }
}

/// Cell rects for `count` cards, scrolled so `selected` is visible.
fn card_slots(area: Rect, count: usize, selected: usize) -> Vec<(usize, Rect)> {
    let columns = column_count(area.width);
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = selected / columns as usize;
    let first_row = selected_row.saturating_sub(visible_rows - 1);
    let card_width = area.width / columns;

    (0..count)
        .filter_map(|index| {
            let row = index / columns as usize;
            if row < first_row || row >= first_row + visible_rows {
                return None;
            }
            let col = (index % columns as usize) as u16;
            let y = area.y + ((row - first_row) as u16) * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(area.y + area.height - y);
            if height < 3 {
                return None;
            }
            Some((
                index,
                Rect {
                    x: area.x + col * card_width,
                    y,
                    width: card_width,
                    height,
                },
            ))
        })
        .collect()
}

fn render_cards(frame: &mut Frame, area: Rect, summaries: &[PostSummary], selected: usize) {
    for (index, slot) in card_slots(area, summaries.len(), selected) {
        render_card(frame, slot, &summaries[index], index == selected);
    }
}

fn render_card(frame: &mut Frame, area: Rect, summary: &PostSummary, selected: bool) {
    let border = if selected { COLOR_ACTIVE } else { COLOR_BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(1) as usize;
    let mut lines = Vec::new();

    let mut meta = Vec::new();
    if let Some(category) = &summary.category {
        meta.push(Span::styled(
            sanitize_inline(category),
            Style::default().fg(COLOR_LINK),
        ));
    }
    if let Some(date) = &summary.date_label {
        if !meta.is_empty() {
            meta.push(Span::styled(" \u{2022} ", Style::default().fg(COLOR_DIM)));
        }
        meta.push(Span::styled(date.clone(), Style::default().fg(COLOR_DIM)));
    }
    lines.push(Line::from(meta));

    let title_style = if selected {
        Style::default().fg(COLOR_ACTIVE).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(
        truncate_string(&sanitize_inline(&summary.title), width),
        title_style,
    )));

    for line in wrap_words(&sanitize_inline(&summary.excerpt), width, 2) {
        lines.push(Line::from(Span::raw(line)));
    }
    while lines.len() < 4 {
        lines.push(Line::default());
    }

    if let Some(author) = &summary.author {
        lines.push(Line::from(Span::styled(
            truncate_string(&format!("By {}", sanitize_inline(author)), width),
            Style::default().fg(COLOR_DIM),
        )));
    }
    lines.push(Line::from(Span::styled(
        truncate_string(&summary.image_url, width),
        Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_skeletons(frame: &mut Frame, area: Rect, count: usize) {
    let bar = Style::default().fg(COLOR_SKELETON);
    for (_, slot) in card_slots(area, count, 0) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(COLOR_SKELETON));
        let inner = block.inner(slot);
        frame.render_widget(block, slot);

        let width = inner.width.saturating_sub(1) as usize;
        let lines: Vec<Line> = [width / 3, width * 3 / 4, width, width * 2 / 3]
            .into_iter()
            .map(|len| Line::from(Span::styled("\u{2591}".repeat(len), bar)))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn render_notice(frame: &mut Frame, area: Rect, message: &str, color: ratatui::style::Color) {
    if area.height == 0 {
        return;
    }
    let notice = Paragraph::new(Line::from(Span::styled(message.to_string(), Style::default().fg(color))))
        .alignment(Alignment::Center);
    let y = area.y + area.height / 3;
    frame.render_widget(notice, Rect { y, height: 1, ..area });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_count_breakpoints() {
        assert_eq!(column_count(60), 1);
        assert_eq!(column_count(80), 2);
        assert_eq!(column_count(150), 3);
    }

    #[test]
    fn test_card_slots_fill_grid() {
        let area = Rect::new(0, 0, 120, 16);
        let slots = card_slots(area, 6, 0);
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[1].1.x, 40);
        assert_eq!(slots[3].1.y, CARD_HEIGHT);
    }

    #[test]
    fn test_card_slots_scroll_to_selection() {
        let area = Rect::new(0, 0, 60, 16);
        let slots = card_slots(area, 5, 4);
        let indexes: Vec<usize> = slots.iter().map(|(i, _)| *i).collect();
        assert_eq!(indexes, vec![3, 4]);
    }
}
