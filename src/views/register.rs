//! Registration form.

use tracing::debug;

use super::form::{is_valid_email, FieldSet, TextField};
use super::request::{RequestGeneration, RequestTracker};
use super::{AuthOutcome, FormError};
use crate::error::ApiResult;
use crate::models::User;

pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";
pub const MIN_PASSWORD_LEN: usize = 6;

const USERNAME: usize = 0;
const EMAIL: usize = 1;
const PASSWORD: usize = 2;
const CONFIRM: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterSubmission {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct RegisterView {
    form: FieldSet,
    submitting: bool,
    error: Option<String>,
    requests: RequestTracker,
}

impl Default for RegisterView {
    fn default() -> Self {
        Self::new()
    }
}

fn register_form() -> FieldSet {
    FieldSet::new(vec![
        TextField::new("Username", "Choose a username"),
        TextField::new("Email", "Enter your email"),
        TextField::new("Password", "Create a password").masked(),
        TextField::new("Confirm Password", "Confirm your password").masked(),
    ])
}

impl RegisterView {
    pub fn new() -> Self {
        Self {
            form: register_form(),
            submitting: false,
            error: None,
            requests: RequestTracker::new(),
        }
    }

    pub fn reset(&mut self) {
        self.requests.invalidate();
        self.form = register_form();
        self.submitting = false;
        self.error = None;
    }

    pub fn leave(&mut self) {
        self.requests.invalidate();
        self.submitting = false;
    }

    pub fn form(&self) -> &FieldSet {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FieldSet {
        &mut self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn validate(&self) -> Result<(), FormError> {
        if self.form.any_blank() {
            return Err(FormError::MissingFields);
        }
        if !is_valid_email(self.form.value(EMAIL)) {
            return Err(FormError::InvalidEmail);
        }
        let password = self.form.value(PASSWORD);
        if password != self.form.value(CONFIRM) {
            return Err(FormError::PasswordMismatch);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort);
        }
        Ok(())
    }

    /// Run the local checks and, if they pass, hand back the payload.
    pub fn begin_submit(&mut self) -> Result<(RegisterSubmission, RequestGeneration), FormError> {
        if self.submitting {
            return Err(FormError::AlreadySubmitting);
        }
        if let Err(e) = self.validate() {
            self.error = Some(e.to_string());
            return Err(e);
        }

        self.error = None;
        self.submitting = true;
        let submission = RegisterSubmission {
            username: self.form.value(USERNAME).trim().to_string(),
            email: self.form.value(EMAIL).trim().to_string(),
            password: self.form.value(PASSWORD).to_string(),
        };
        Ok((submission, self.requests.issue()))
    }

    pub fn apply_result(&mut self, generation: RequestGeneration, result: &ApiResult<User>) -> AuthOutcome {
        if !self.requests.complete(generation) {
            debug!(%generation, "Dropping stale register response");
            return AuthOutcome::Stale;
        }
        self.submitting = false;

        match result {
            Ok(_) => {
                self.form = register_form();
                self.error = None;
                AuthOutcome::Succeeded
            }
            Err(e) => {
                self.error = Some(e.user_message(REGISTER_FAILED));
                self.form.clear_masked();
                AuthOutcome::Failed
            }
        }
    }
}
