//! Domain error model.

use thiserror::Error;

use crate::validate::ValidationError;

/// Result type used across the auth domain.
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-domain error.
///
/// Every failure the core can produce is a variant here; the transport
/// layer alone decides logging and status-code mapping. `Unexpected`
/// carries opaque storage/signing failures that are not a recognized
/// domain condition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Presented password does not match the stored hash.
    #[error("credentials are invalid")]
    InvalidCredentials,

    /// Token is malformed, unsigned, tampered, or missing a required field.
    #[error("token is invalid")]
    InvalidToken,

    /// Token is well-formed but past its expiry instant.
    ///
    /// Distinct from [`AuthError::InvalidToken`] so callers can prompt a
    /// refresh rather than a full re-login.
    #[error("token expired")]
    TokenExpired,

    /// No user record matches the given email or id.
    #[error("user does not exist")]
    UserNotFound,

    /// A user with this email already exists.
    #[error("email is not unique")]
    EmailNotUnique,

    /// Caller's role does not meet the operation's required role.
    #[error("permission denied")]
    PermissionDenied,

    /// An admin attempted to delete their own account.
    #[error("cannot delete your own account while logged in as admin")]
    CannotDeleteSelf,

    /// Public registration attempted to create an admin account.
    #[error("admin accounts cannot be self-registered")]
    CannotCreateAdmin,

    /// A registration field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Opaque infrastructure failure (storage, signing, entropy).
    #[error("unexpected internal failure: {0}")]
    Unexpected(String),
}

impl AuthError {
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }
}
