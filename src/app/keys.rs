//! Keyboard handling for the App.
//!
//! | View | Keys |
//! |------|------|
//! | any (not typing) | `q` quit, `l` login, `s` sign up, `L` logout |
//! | listing | `j`/`k` or arrows select, `Enter` open, `r` reload |
//! | detail | `Esc`/`b` back, `c` write comment, `r` refresh comments, `j`/`k` scroll |
//! | forms | `Tab`/`Shift-Tab` focus, `Enter` next field or submit, `Esc` back |
//!
//! `Ctrl-C` always quits.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Route};
use crate::views::FieldSet;

/// Result of feeding a key to a text form.
enum FormKey {
    Submit,
    Cancel,
    Handled,
    Ignored,
}

fn edit_form(form: &mut FieldSet, key: KeyEvent) -> FormKey {
    match key.code {
        KeyCode::Esc => FormKey::Cancel,
        KeyCode::Tab | KeyCode::Down => {
            form.focus_next();
            FormKey::Handled
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus_prev();
            FormKey::Handled
        }
        KeyCode::Enter if form.is_last_focused() => FormKey::Submit,
        KeyCode::Enter => {
            form.focus_next();
            FormKey::Handled
        }
        KeyCode::Backspace => {
            form.backspace();
            FormKey::Handled
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
        {
            form.push(c);
            FormKey::Handled
        }
        _ => FormKey::Ignored,
    }
}

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match self.route {
            Route::Listing => self.handle_listing_key(key),
            Route::Detail { .. } if self.detail.is_editing() => self.handle_comment_key(key),
            Route::Detail { .. } => self.handle_detail_key(key),
            Route::Login => self.handle_login_key(key),
            Route::Register => self.handle_register_key(key),
        }
    }

    /// Bracketed paste goes into the focused form field, if any. Newlines
    /// are flattened since every field is a single line.
    pub fn handle_paste(&mut self, text: &str) {
        let form = match self.route {
            Route::Detail { .. } if self.detail.is_editing() => self.detail.form_mut(),
            Route::Login => self.login.form_mut(),
            Route::Register => self.register.form_mut(),
            _ => return,
        };
        for c in text.chars() {
            form.push(if c == '\n' || c == '\r' { ' ' } else { c });
        }
        self.mark_dirty();
    }

    /// Shell-level keys shared by the reading views.
    fn handle_shell_key(&mut self, key: KeyEvent) -> bool {
        let authenticated = self.session().is_authenticated();
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('l') if !authenticated => self.navigate(Route::Login),
            KeyCode::Char('s') if !authenticated => self.navigate(Route::Register),
            KeyCode::Char('L') if authenticated => self.logout(),
            _ => return false,
        }
        true
    }

    fn handle_listing_key(&mut self, key: KeyEvent) {
        if self.handle_shell_key(key) {
            return;
        }
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.listing.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.listing.select_prev(),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        if self.handle_shell_key(key) {
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => self.navigate(Route::Listing),
            KeyCode::Char('c') => self.detail.start_editing(),
            KeyCode::Char('r') => self.refresh_comments(),
            KeyCode::Down | KeyCode::Char('j') => self.detail.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.detail.scroll_up(),
            _ => {}
        }
    }

    fn handle_comment_key(&mut self, key: KeyEvent) {
        match edit_form(self.detail.form_mut(), key) {
            FormKey::Submit => self.submit_comment(),
            FormKey::Cancel => self.detail.stop_editing(),
            FormKey::Handled | FormKey::Ignored => {}
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.navigate(Route::Register);
            return;
        }
        match edit_form(self.login.form_mut(), key) {
            FormKey::Submit => self.submit_login(),
            FormKey::Cancel => self.navigate(Route::Listing),
            FormKey::Handled | FormKey::Ignored => {}
        }
    }

    fn handle_register_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.navigate(Route::Login);
            return;
        }
        match edit_form(self.register.form_mut(), key) {
            FormKey::Submit => self.submit_register(),
            FormKey::Cancel => self.navigate(Route::Listing),
            FormKey::Handled | FormKey::Ignored => {}
        }
    }
}
