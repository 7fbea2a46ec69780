//! Agent creation form validation
//!
//! The pipeline short-circuits on the first violated rule, in a fixed
//! order, so the messages shown to an admin are deterministic when
//! several fields are invalid at once.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Email must look like `nonspace@nonspace.nonspace` somewhere in the
/// string. Anything stricter is left to the backend.
fn email_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

/// First violated validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("An agent with this email already exists")]
    DuplicateEmail,
}

/// Transient creation-form state. Exists only for the lifetime of one
/// create flow; discarded on cancel or successful submission.
#[derive(Debug, Clone, Default)]
pub struct AgentForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl AgentForm {
    pub fn new(name: &str, email: &str, password: &str, confirm_password: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }

    /// Field-level validation, short-circuiting in fixed order. The
    /// duplicate-email rule is checked separately against the loaded
    /// agent list.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::NameRequired);
        }
        if self.email.trim().is_empty() {
            return Err(FormError::EmailRequired);
        }
        if !email_shape().is_match(&self.email) {
            return Err(FormError::EmailInvalid);
        }
        if self.password.is_empty() {
            return Err(FormError::PasswordRequired);
        }
        if self.password.chars().count() < 8 {
            return Err(FormError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}
