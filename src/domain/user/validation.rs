//! Registration field validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during registration validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email address '{0}' is not valid")]
    InvalidEmail(String),
}

const MAX_USERNAME_LENGTH: usize = 100;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

/// Validate a display name
///
/// Rules:
/// - Cannot be empty (after trimming)
/// - Maximum 100 characters
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    let trimmed = username.trim();

    if trimmed.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if trimmed.chars().count() > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    Ok(())
}

/// Validate an email address against the basic `local@domain.tld` shape
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if !EMAIL_RE.is_match(trimmed) {
        return Err(UserValidationError::InvalidEmail(trimmed.to_string()));
    }

    Ok(())
}

/// Normalize an email address for storage and lookup.
///
/// Emails are unique case-insensitively, so every address is trimmed and
/// lowercased before it touches the repository.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
