//! HTTP application wiring (axum router + service construction).
//!
//! Layout:
//! - `services.rs`: builds the auth stack over a chosen directory
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `errors.rs`: domain error → status-code mapping

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and
/// the black-box tests).
pub fn build_app(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
