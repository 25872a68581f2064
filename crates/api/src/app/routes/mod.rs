use axum::Router;

pub mod admin;
pub mod auth;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
