//! Public auth routes: register, login, refresh, whoami.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;

use gatekey_core::Role;

use crate::app::{AppServices, errors};
use crate::middleware::extract_bearer;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to `user`. Sending `admin` here is always rejected.
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/whoami", get(whoami))
}

/// POST /auth/register
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<RegisterRequest>,
) -> axum::response::Response {
    let role = match body.role.as_deref() {
        None => Role::default(),
        Some(raw) => match raw.parse::<Role>() {
            Ok(role) => role,
            Err(e) => {
                return errors::json_error(StatusCode::BAD_REQUEST, "invalid_role", e.to_string());
            }
        },
    };

    match services
        .account
        .register(&body.name, &body.email, &body.password, role)
        .await
    {
        Ok(id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": id })),
        )
            .into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

/// POST /auth/login
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    match services.account.login(&body.email, &body.password).await {
        Ok(pair) => (StatusCode::OK, Json(pair)).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

/// POST /auth/refresh
pub async fn refresh(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<RefreshRequest>,
) -> axum::response::Response {
    match services.tokens.refresh(&body.refresh_token).await {
        Ok(pair) => (StatusCode::OK, Json(pair)).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

/// GET /auth/whoami — resolve the presented access token to the current
/// user record.
pub async fn whoami(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let token = match extract_bearer(&headers) {
        Ok(token) => token,
        Err(response) => return response,
    };

    match services.gate.authenticate(token).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}
