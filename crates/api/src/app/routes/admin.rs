//! Admin routes: user administration over arbitrary ids.
//!
//! Every handler forwards the bearer token to the admin service, which
//! authorizes it against the admin role before touching the directory.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use gatekey_core::{Role, UserId};

use crate::app::{AppServices, errors};
use crate::middleware::extract_bearer;

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub role: String,
}

pub fn router() -> Router {
    Router::new().route("/users/:id", get(get_user).put(update_user).delete(delete_user))
}

/// GET /admin/users/:id
pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> axum::response::Response {
    let token = match extract_bearer(&headers) {
        Ok(token) => token,
        Err(response) => return response,
    };

    match services.admin.get_user(token, UserId::new(id)).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

/// PUT /admin/users/:id — update display name and role.
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateUserRequest>,
) -> axum::response::Response {
    let token = match extract_bearer(&headers) {
        Ok(token) => token,
        Err(response) => return response,
    };

    let role = match body.role.parse::<Role>() {
        Ok(role) => role,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_role", e.to_string()),
    };

    match services
        .admin
        .update_user(token, UserId::new(id), &body.name, role)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

/// DELETE /admin/users/:id
pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> axum::response::Response {
    let token = match extract_bearer(&headers) {
        Ok(token) => token,
        Err(response) => return response,
    };

    match services.admin.delete_user(token, UserId::new(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}
