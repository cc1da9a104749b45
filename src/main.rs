mod app;
mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod response;
mod services;

use std::sync::Arc;

use app::{AppState, build_router};
use auth::jwt::JwtManager;
use config::Config;
use db::pg_store::PgStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Si RUST_LOG n'est pas défini, utiliser ces règles par défaut
        tracing_subscriber::EnvFilter::new(
            "info,campus_share=debug,hyper_util=warn,tower_http=info",
        )
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// ----------------- Main -----------------

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    setup_logging();
    tracing::info!("Starting campus-share...");

    let config = Config::from_env()?;
    let pool = db::connection::create_pool(&config.database_url, config.db_pool_size)?;
    let store = Arc::new(PgStore::new(pool));
    let jwt_manager = JwtManager::new(&config.jwt_secret, config.jwt_expiration_hours);

    let app = build_router(AppState::new(store, jwt_manager), &config.frontend_url);

    if std::env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok() {
        tracing::info!("Running in Lambda mode");
        lambda_http::run(app).await
    } else {
        tracing::info!(
            production = config.is_production(),
            "Running in local HTTP server mode"
        );
        let addr = format!("{}:{}", config.server_host, config.server_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("🚀 Server running at http://{}", addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
