//! Bearer-token extraction from request headers.

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;

use crate::app::errors;

/// Pull the access token out of `Authorization: Bearer <token>`.
///
/// A missing or malformed header is an authentication failure in its own
/// right; token validation has not happened yet at this point.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, Response> {
    let unauthorized = || {
        errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "missing or malformed Authorization header",
        )
    };

    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(unauthorized)?
        .to_str()
        .map_err(|_| unauthorized())?;

    let token = header.strip_prefix("Bearer ").ok_or_else(unauthorized)?.trim();
    if token.is_empty() {
        return Err(unauthorized());
    }

    Ok(token)
}
