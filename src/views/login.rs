//! Login form.

use tracing::debug;

use super::form::{FieldSet, TextField};
use super::request::{RequestGeneration, RequestTracker};
use super::{AuthOutcome, FormError};
use crate::error::ApiResult;
use crate::models::User;

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const DEMO_HINT: &str = "Demo credentials: demo@example.com / password";

const IDENTIFIER: usize = 0;
const PASSWORD: usize = 1;

/// Credentials captured from the form at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSubmission {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginView {
    form: FieldSet,
    submitting: bool,
    error: Option<String>,
    requests: RequestTracker,
}

impl Default for LoginView {
    fn default() -> Self {
        Self::new()
    }
}

fn login_form() -> FieldSet {
    FieldSet::new(vec![
        TextField::new("Email or Username", "Enter your email or username"),
        TextField::new("Password", "Enter your password").masked(),
    ])
}

impl LoginView {
    pub fn new() -> Self {
        Self {
            form: login_form(),
            submitting: false,
            error: None,
            requests: RequestTracker::new(),
        }
    }

    /// Fresh form, as when the screen is opened.
    pub fn reset(&mut self) {
        self.requests.invalidate();
        self.form = login_form();
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

    pub fn begin_submit(&mut self) -> Result<(LoginSubmission, RequestGeneration), FormError> {
        if self.submitting {
            return Err(FormError::AlreadySubmitting);
        }
        if self.form.any_blank() {
            self.error = Some(FormError::MissingFields.to_string());
            return Err(FormError::MissingFields);
        }

        self.error = None;
        self.submitting = true;
        let submission = LoginSubmission {
            identifier: self.form.value(IDENTIFIER).trim().to_string(),
            password: self.form.value(PASSWORD).to_string(),
        };
        Ok((submission, self.requests.issue()))
    }

    /// Apply the session's login result.
    pub fn apply_result(&mut self, generation: RequestGeneration, result: &ApiResult<User>) -> AuthOutcome {
        if !self.requests.complete(generation) {
            debug!(%generation, "Dropping stale login response");
            return AuthOutcome::Stale;
        }
        self.submitting = false;

        match result {
            Ok(_) => {
                self.form = login_form();
                self.error = None;
                AuthOutcome::Succeeded
            }
            Err(e) => {
                self.error = Some(e.user_message(LOGIN_FAILED));
                self.form.clear_masked();
                AuthOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::traits::HttpError;

    fn filled() -> LoginView {
        let mut view = LoginView::new();
        view.form_mut().set_value(IDENTIFIER, "demo@example.com");
        view.form_mut().set_value(PASSWORD, "password");
        view
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut view = LoginView::new();
        view.form_mut().set_value(IDENTIFIER, "demo");
        assert_eq!(view.begin_submit().unwrap_err(), FormError::MissingFields);
        assert!(!view.is_submitting());
    }

    #[test]
    fn test_submit_captures_credentials() {
        let mut view = filled();
        let (submission, _) = view.begin_submit().unwrap();
        assert_eq!(submission.identifier, "demo@example.com");
        assert_eq!(submission.password, "password");
        assert!(view.is_submitting());
        assert_eq!(view.begin_submit().unwrap_err(), FormError::AlreadySubmitting);
    }

    #[test]
    fn test_server_message_shown_and_password_cleared() {
        let mut view = filled();
        let (_, generation) = view.begin_submit().unwrap();
        let outcome = view.apply_result(
            generation,
            &Err(ApiError::Server {
                status: 400,
                message: Some("Invalid identifier or password".to_string()),
            }),
        );

        assert_eq!(outcome, AuthOutcome::Failed);
        assert_eq!(view.error(), Some("Invalid identifier or password"));
        assert_eq!(view.form().value(IDENTIFIER), "demo@example.com");
        assert_eq!(view.form().value(PASSWORD), "");
    }

    #[test]
    fn test_fallback_message_without_server_message() {
        let mut view = filled();
        let (_, generation) = view.begin_submit().unwrap();
        view.apply_result(
            generation,
            &Err(ApiError::Network(HttpError::ConnectionFailed("refused".to_string()))),
        );
        assert_eq!(view.error(), Some(LOGIN_FAILED));
    }

    #[test]
    fn test_success_resets_form() {
        let mut view = filled();
        let (_, generation) = view.begin_submit().unwrap();
        let user = User {
            id: 1,
            username: "demo".to_string(),
            email: String::new(),
        };
        assert_eq!(view.apply_result(generation, &Ok(user)), AuthOutcome::Succeeded);
        assert_eq!(view.form().value(IDENTIFIER), "");
    }

    #[test]
    fn test_result_after_reset_is_stale() {
        let mut view = filled();
        let (_, generation) = view.begin_submit().unwrap();
        view.reset();
        assert_eq!(
            view.apply_result(generation, &Err(ApiError::Decode("x".to_string()))),
            AuthOutcome::Stale
        );
        assert!(view.error().is_none());
    }
}
