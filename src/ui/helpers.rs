//! Helper functions and constants for UI rendering
//!
//! Truncation, word wrap, spinner frames and centering.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

/// Spinner frames for loading animation
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner frame for the given tick. The main loop ticks every 16ms, so
/// frames advance every sixth tick.
pub fn spinner_frame(tick_count: u64) -> &'static str {
    SPINNER_FRAMES[((tick_count / 6) % SPINNER_FRAMES.len() as u64) as usize]
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Truncate to at most `max_width` display columns, ending in "..." when
/// anything was cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Greedy word wrap into at most `max_lines` lines of `width` columns.
/// The last line is truncated when text remains.
pub fn wrap_words(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if candidate.chars().count() <= width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if lines.len() == max_lines {
            break;
        }
        current = word.to_string();
    }
    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }
    let consumed: usize = lines.iter().map(|l| l.split_whitespace().count()).sum();
    if consumed < text.split_whitespace().count() {
        if let Some(last) = lines.last_mut() {
            *last = truncate_string(&format!("{} ...", last), width);
        }
    }
    lines
        .into_iter()
        .map(|line| truncate_string(&line, width))
        .collect()
}
