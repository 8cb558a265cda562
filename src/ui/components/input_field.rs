//! Input Field Component
//!
//! A text input field with focus handling, password masking, and inline error display.
//! Rounded borders over the input background.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::{COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_INPUT_BG};
use crate::views::TextField;

/// Configuration for rendering an input field
#[derive(Debug, Clone)]
pub struct InputFieldConfig<'a> {
    /// Label displayed above the input
    pub label: &'a str,
    /// Current value of the input
    pub value: &'a str,
    /// Whether the input is currently focused
    pub focused: bool,
    /// Whether to mask the value (for passwords)
    pub is_password: bool,
    /// Optional error message to display below the input
    pub error: Option<&'a str>,
    /// Optional placeholder text when empty
    pub placeholder: Option<&'a str>,
}

impl<'a> InputFieldConfig<'a> {
    /// Create a new input field configuration
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
            is_password: false,
            error: None,
            placeholder: None,
        }
    }

    /// Configuration mirroring a form field.
    pub fn from_field(field: &'a TextField) -> Self {
        Self::new(field.label, &field.value)
            .password(field.masked)
            .placeholder(field.placeholder)
    }

    /// Set whether the input is focused
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set whether to mask the value (for passwords)
    pub fn password(mut self, is_password: bool) -> Self {
        self.is_password = is_password;
        self
    }

    /// Set an error message to display
    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// Set placeholder text
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Text shown inside the box, before the cursor.
    fn display_value(&self) -> String {
        match self.placeholder {
            Some(placeholder) if self.value.is_empty() => placeholder.to_string(),
            _ if self.is_password => "\u{2022}".repeat(self.value.chars().count()),
            _ => self.value.to_string(),
        }
    }
}

/// Calculate the height needed for an input field
///
/// Returns the number of rows needed:
/// - 1 for label
/// - 3 for input box (border + content + border)
/// - 1 for error (if present)
pub fn calculate_input_field_height(config: &InputFieldConfig) -> u16 {
    let mut height = 4; // Label (1) + input box (3)
    if config.error.is_some() {
        height += 1;
    }
    height
}

/// Render an input field with label, input box, and optional error
///
/// Returns the height consumed by this input field.
pub fn render_input_field(frame: &mut Frame, area: Rect, config: &InputFieldConfig) -> u16 {
    let mut y_offset = 0;
    let bottom = area.y + area.height;

    let label_style = if config.focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(COLOR_DIM)
    };

    let row = |y_offset: u16, height: u16| Rect {
        x: area.x + 2,
        y: area.y + y_offset,
        width: area.width.saturating_sub(4),
        height: height.min(bottom.saturating_sub(area.y + y_offset)),
    };

    let label = Paragraph::new(Line::from(Span::styled(config.label, label_style)));
    frame.render_widget(label, row(y_offset, 1));
    y_offset += 1;

    if area.height < y_offset + 3 {
        return y_offset;
    }

    let border_color = if config.focused {
        Color::White
    } else {
        COLOR_BORDER
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(COLOR_INPUT_BG));

    let text_style = if config.value.is_empty() && config.placeholder.is_some() {
        Style::default().fg(COLOR_DIM)
    } else if config.focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(COLOR_DIM)
    };

    let mut spans = Vec::with_capacity(2);
    if config.focused {
        spans.push(Span::styled("\u{2588}", Style::default().fg(Color::White)));
    }
    // Cursor sits before the placeholder, after typed text.
    if config.value.is_empty() {
        spans.push(Span::styled(config.display_value(), text_style));
    } else {
        spans.insert(0, Span::styled(config.display_value(), text_style));
    }

    let input_text = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(input_text, row(y_offset, 3));
    y_offset += 3;

    if let Some(error) = config.error {
        if area.height > y_offset {
            let error_text = Paragraph::new(Line::from(vec![
                Span::styled("\u{2717} ", Style::default().fg(COLOR_ERROR)),
                Span::styled(error, Style::default().fg(COLOR_ERROR)),
            ]));
            frame.render_widget(error_text, row(y_offset, 1));
            y_offset += 1;
        }
    }

    y_offset
}

// ============================================================================
// Tests
// ============================================================================
