use anyhow::{Context, Result};
use redirect_service::config;
use redirect_service::publisher::{ClickPublisher, KafkaClickSink};
use redirect_service::resolver::Resolver;
use redirect_service::routes::app_router;
use redirect_service::state::AppState;
use redirect_service::store::{RedisUrlStore, UrlStore};
use shared::connection::create_producer;
use shared::shutdown::shutdown_signal;
use shared::telemetry::init_tracing;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = config::load_from_env().context("Invalid configuration")?;
    config.print_summary();

    let redis = shared::connect_redis(&config.redis.url())
        .await
        .context("Redis connection failed")?;
    let store = RedisUrlStore::new(redis);
    store.ping().await.context("Redis PING failed")?;
    info!("Connected to Redis at {}:{}", config.redis.host, config.redis.port);

    let producer = create_producer(&config.kafka.bootstrap_servers(), config.publish_timeout)?;
    let sink = KafkaClickSink::new(producer, config.kafka.topic.clone());
    let (publisher, worker) = ClickPublisher::spawn(
        Arc::new(sink),
        config.click_queue_capacity,
        config.publish_max_in_flight,
    );
    info!(
        "Click queue holds {} events, {} deliveries in flight",
        publisher.capacity(),
        config.publish_max_in_flight
    );

    let resolver = Resolver::new(
        Arc::new(store),
        config.lookup_timeout,
        config.health_timeout,
    );
    let app = app_router(AppState::new(resolver, publisher));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {addr}"))?;
    info!("🚀 HTTP server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server error")?;

    // Queued clicks get a short grace period; whatever is left is lost.
    if tokio::time::timeout(Duration::from_secs(5), worker).await.is_err() {
        warn!("Click worker did not drain in time, remaining events dropped");
    }

    info!("Server exited");
    Ok(())
}
