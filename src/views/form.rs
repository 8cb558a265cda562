//! Controlled text fields shared by the comment, login and register forms.

use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld` with no whitespace; the same shape an email input accepts.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("Invalid email regex pattern")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

/// One single-line text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    /// Render as bullets
    pub masked: bool,
}

impl TextField {
    pub fn new(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            label,
            placeholder,
            value: String::new(),
            masked: false,
        }
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn push(&mut self, c: char) {
        if !c.is_control() {
            self.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// An ordered group of fields with a focus index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<TextField>,
    focus: usize,
}

impl FieldSet {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn fields(&self) -> &[TextField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn is_last_focused(&self) -> bool {
        self.focus + 1 == self.fields.len()
    }

    /// Type into the focused field.
    pub fn push(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.backspace();
        }
    }

    pub fn any_blank(&self) -> bool {
        self.fields.iter().any(TextField::is_blank)
    }

    pub fn clear_all(&mut self) {
        self.fields.iter_mut().for_each(TextField::clear);
        self.focus = 0;
    }

    pub fn clear_masked(&mut self) {
        self.fields
            .iter_mut()
            .filter(|f| f.masked)
            .for_each(TextField::clear);
    }
}
