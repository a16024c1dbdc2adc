use analytics_service::config;
use analytics_service::consumer::consume_clicks;
use analytics_service::routes::app_router;
use analytics_service::state::AppState;
use analytics_service::store::{ClickStore, SeaOrmClickStore};
use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use shared::connection::create_consumer;
use shared::shutdown::shutdown_signal;
use shared::telemetry::init_tracing;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = config::load_from_env().context("Invalid configuration")?;
    config.print_summary();

    let db = shared::connect_db(&config.database_url)
        .await
        .context("Database connection failed")?;
    Migrator::up(&*db, None)
        .await
        .context("Failed to run migrations")?;

    let store: Arc<dyn ClickStore> = Arc::new(SeaOrmClickStore::new(db));

    let consumer = create_consumer(
        &config.kafka.bootstrap_servers(),
        &config.group_id,
        &config.offset_reset,
        &config.kafka.topic,
    )?;
    let consumer_task = tokio::spawn(consume_clicks(consumer, store.clone()));

    let app = app_router(AppState {
        store,
        health_timeout: config.health_timeout,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {addr}"))?;
    info!("🚀 HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    consumer_task.abort();
    info!("Server exited");
    Ok(())
}
