//! Input validation for user and entry fields.

use thiserror::Error;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Invalid email format.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
    /// Value too long.
    #[error("{field} is too long ({actual} chars, max {max})")]
    TooLong { field: String, max: usize, actual: usize },
    /// Empty value where one is required.
    #[error("{0} cannot be empty")]
    Empty(String),
}

/// Maximum allowed length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum allowed length for reflection text.
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Maximum allowed length for display names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Validate an email address.
///
/// Checks for exactly one `@`, a non-empty local part, and a dotted domain
/// without leading, trailing, or doubled dots.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Empty("email".to_string()));
    }

    check_length("email", email, MAX_EMAIL_LENGTH)?;

    let (local, domain) = match email.split_once('@') {
        Some((local, domain)) if !domain.contains('@') => (local, domain),
        _ => {
            return Err(ValidationError::InvalidEmail(
                "must contain exactly one @ symbol".to_string(),
            ))
        }
    };

    if local.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "missing local part (before @)".to_string(),
        ));
    }

    if !domain.contains('.') {
        return Err(ValidationError::InvalidEmail(
            "domain must contain at least one dot".to_string(),
        ));
    }

    if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return Err(ValidationError::InvalidEmail(
            "malformed domain".to_string(),
        ));
    }

    Ok(())
}

/// Validate reflection text. Whitespace-only content counts as empty.
pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::Empty("content".to_string()));
    }

    check_length("content", content, MAX_CONTENT_LENGTH)
}

/// Validate an optional display name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    check_length("name", name.trim(), MAX_NAME_LENGTH)
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual,
        });
    }
    Ok(())
}
