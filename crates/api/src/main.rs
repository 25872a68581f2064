use std::sync::Arc;

use gatekey_api::app::{self, AppServices};
use gatekey_api::config::AppConfig;
use gatekey_infra::PgUserDirectory;

#[tokio::main]
async fn main() {
    gatekey_observability::init();

    let cfg = AppConfig::from_env();

    let directory = PgUserDirectory::connect(&cfg.database_url)
        .await
        .expect("failed to connect to postgres");
    directory
        .seed_admin(&cfg.admin.name, &cfg.admin.email, &cfg.admin.password)
        .await
        .expect("failed to seed bootstrap admin");

    let services = Arc::new(AppServices::new(
        &cfg.secret,
        cfg.access_ttl,
        cfg.refresh_ttl,
        Arc::new(directory),
    ));
    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&cfg.http_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", cfg.http_addr));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
