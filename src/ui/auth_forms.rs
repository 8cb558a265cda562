//! Login and registration dialogs.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::components::{calculate_input_field_height, render_input_field, InputFieldConfig};
use super::helpers::{centered_rect, spinner_frame};
use super::theme::{COLOR_BORDER, COLOR_DIALOG_BG, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_LINK};
use crate::app::App;
use crate::views::login::DEMO_HINT;
use crate::views::FieldSet;

const DIALOG_WIDTH: u16 = 60;

/// Static text around a form.
struct FormCopy<'a> {
    title: &'a str,
    subtitle: &'a str,
    submit: &'a str,
    busy: &'a str,
    switch_hint: &'a str,
    footnote: Option<&'a str>,
}

pub fn render_login(frame: &mut Frame, area: Rect, app: &App) {
    let copy = FormCopy {
        title: "Welcome Back",
        subtitle: "Sign in to your account",
        submit: "Sign In",
        busy: "Signing in...",
        switch_hint: "Don't have an account? [Ctrl-S] Sign up here",
        footnote: Some(DEMO_HINT),
    };
    render_form(
        frame,
        area,
        app,
        &copy,
        app.login.form(),
        app.login.error(),
        app.login.is_submitting(),
    );
}

pub fn render_register(frame: &mut Frame, area: Rect, app: &App) {
    let copy = FormCopy {
        title: "Create Account",
        subtitle: "Create your account to get started",
        submit: "Create Account",
        busy: "Creating account...",
        switch_hint: "Already have an account? [Ctrl-L] Sign in here",
        footnote: None,
    };
    render_form(
        frame,
        area,
        app,
        &copy,
        app.register.form(),
        app.register.error(),
        app.register.is_submitting(),
    );
}

fn render_form(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    copy: &FormCopy<'_>,
    form: &FieldSet,
    error: Option<&str>,
    submitting: bool,
) {
    let fields_height: u16 = form
        .fields()
        .iter()
        .map(|field| calculate_input_field_height(&InputFieldConfig::from_field(field)))
        .sum();
    // Borders (2), subtitle + gap (2), error (1), button (1), gap (1), hint (1), footnote (1)
    let height = fields_height + 9;
    let dialog = centered_rect(DIALOG_WIDTH, height, area);

    frame.render_widget(Clear, dialog);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .style(Style::default().bg(COLOR_DIALOG_BG))
        .title(Span::styled(
            format!(" {} ", copy.title),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    if inner.height == 0 {
        return;
    }
    let bottom = inner.y + inner.height;
    let mut y = inner.y;
    let line_at = |y: u16| Rect { y, height: 1, ..inner };

    frame.render_widget(
        Paragraph::new(Span::styled(copy.subtitle, Style::default().fg(COLOR_DIM)))
            .alignment(Alignment::Center),
        line_at(y),
    );
    y += 2;

    for (index, field) in form.fields().iter().enumerate() {
        if y >= bottom {
            return;
        }
        let config = InputFieldConfig::from_field(field).focused(index == form.focus());
        y += render_input_field(frame, Rect { y, height: bottom - y, ..inner }, &config);
    }

    let mut trailer = Vec::new();
    trailer.push(match error {
        Some(error) => Line::from(Span::styled(
            format!("\u{2717} {}", error),
            Style::default().fg(COLOR_ERROR),
        )),
        None => Line::default(),
    });
    trailer.push(if submitting {
        Line::from(Span::styled(
            format!("{} {}", spinner_frame(app.tick_count), copy.busy),
            Style::default().fg(COLOR_DIM),
        ))
    } else {
        Line::from(Span::styled(
            format!("[Enter] {}", copy.submit),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ))
    });
    trailer.push(Line::default());
    trailer.push(Line::from(Span::styled(copy.switch_hint, Style::default().fg(COLOR_LINK))));
    if let Some(footnote) = copy.footnote {
        trailer.push(Line::from(Span::styled(footnote, Style::default().fg(COLOR_DIM))));
    }

    for line in trailer {
        if y >= bottom {
            break;
        }
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), line_at(y));
        y += 1;
    }
}
