use api::AppState;
use gatekit_core::AppConfig;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod seed;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let (config, overrides) = AppConfig::load_with_env().expect("failed to load configuration");
    for key in &overrides {
        tracing::info!(%key, "configuration value overridden from environment");
    }

    let pool = store::connect(&config.database.url)
        .await
        .expect("failed to open database");
    store::MIGRATOR
        .run(&pool)
        .await
        .expect("failed to run migrations");

    seed::seed_database(&pool).await.expect("failed to seed database");

    let state = Arc::new(AppState::new(
        pool,
        config.auth.jwt_secret.clone(),
        config.auth.token_expiry_seconds,
    ));
    let app = api::router::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    tracing::info!(addr = %listener.local_addr().unwrap(), "gatekit listening");
    axum::serve(listener, app).await.expect("server error");
}
