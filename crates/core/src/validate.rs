//! Registration field validation.
//!
//! Limits are byte lengths. The password cap matches the bcrypt input
//! limit; exceeding it would silently truncate the secret.

use thiserror::Error;

pub const NAME_MIN_BYTES: usize = 4;
pub const NAME_MAX_BYTES: usize = 72;
pub const EMAIL_MAX_BYTES: usize = 255;
pub const PASSWORD_MIN_BYTES: usize = 8;
pub const PASSWORD_MAX_BYTES: usize = 72;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name field is required")]
    EmptyName,

    #[error("name must be in range of {NAME_MIN_BYTES} and {NAME_MAX_BYTES} bytes")]
    InvalidName,

    #[error("email is invalid")]
    InvalidEmail,

    #[error("password field is required")]
    EmptyPassword,

    #[error("password must be in range of {PASSWORD_MIN_BYTES} and {PASSWORD_MAX_BYTES} bytes")]
    InvalidPassword,
}

/// Validate a display name against the length rules.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.len() < NAME_MIN_BYTES || name.len() > NAME_MAX_BYTES {
        return Err(ValidationError::InvalidName);
    }
    Ok(())
}

/// Structural address check: exactly one `@` with a non-empty local part
/// and a dotted, non-empty domain. The directory's unique index is the
/// authoritative gate on the value itself.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.len() > EMAIL_MAX_BYTES {
        return Err(ValidationError::InvalidEmail);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(ValidationError::InvalidEmail);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    if password.len() < PASSWORD_MIN_BYTES || password.len() > PASSWORD_MAX_BYTES {
        return Err(ValidationError::InvalidPassword);
    }
    Ok(())
}

/// Validate the full registration triple (name, email, password).
pub fn validate_credentials(name: &str, email: &str, password: &str) -> Result<(), ValidationError> {
    validate_name(name)?;
    validate_email(email)?;
    validate_password(password)?;
    Ok(())
}
