//! Consistent error responses.
//!
//! The core returns typed failures and never logs-and-swallows; this is
//! the one place they become status codes.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use gatekey_core::AuthError;

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    let (status, code) = match &err {
        AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "token_expired"),
        AuthError::PermissionDenied => (StatusCode::FORBIDDEN, "permission_denied"),
        AuthError::CannotDeleteSelf => (StatusCode::FORBIDDEN, "cannot_delete_self"),
        AuthError::CannotCreateAdmin => (StatusCode::FORBIDDEN, "cannot_create_admin"),
        AuthError::UserNotFound => (StatusCode::NOT_FOUND, "not_found"),
        AuthError::EmailNotUnique => (StatusCode::CONFLICT, "email_not_unique"),
        AuthError::Unexpected(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "request failed unexpectedly");
    }

    json_error(status, code, err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
