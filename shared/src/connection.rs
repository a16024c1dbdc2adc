use anyhow::{Context, Result};
use rdkafka::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::producer::FutureProducer;
use redis::Client;
use redis::aio::ConnectionManager;
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub type DbPool = Arc<DatabaseConnection>;

pub async fn connect_db(db_url: &str) -> Result<DbPool> {
    let db = Database::connect(db_url)
        .await
        .context("Failed to connect to database")?;

    Ok(Arc::new(db))
}

/// Multiplexed Redis connection that reconnects on its own; cheap to clone.
pub type RedisPool = ConnectionManager;

pub async fn connect_redis(redis_url: &str) -> Result<RedisPool> {
    let client = Client::open(redis_url).context("Invalid Redis URL")?;

    let manager = ConnectionManager::new(client)
        .await
        .context("Failed to connect to Redis")?;

    Ok(manager)
}

/// Producer tuned for per-event latency: no linger, one message per batch,
/// leader acknowledgement only.
pub fn create_producer(brokers: &str, delivery_timeout: Duration) -> Result<FutureProducer> {
    let producer: FutureProducer = ClientConfig::new()
        .set("bootstrap.servers", brokers)
        .set("message.timeout.ms", delivery_timeout.as_millis().to_string())
        .set("linger.ms", "0")
        .set("batch.num.messages", "1")
        .set("acks", "1")
        .create()
        .context("Kafka producer creation failed")?;

    info!(brokers, "Kafka producer initialized");
    Ok(producer)
}

pub fn create_consumer(
    brokers: &str,
    group_id: &str,
    offset_reset: &str,
    topic: &str,
) -> Result<StreamConsumer> {
    let consumer: StreamConsumer = ClientConfig::new()
        .set("bootstrap.servers", brokers)
        .set("group.id", group_id)
        .set("auto.offset.reset", offset_reset)
        .set("enable.auto.commit", "true")
        .set("auto.commit.interval.ms", "1000")
        .set("fetch.min.bytes", "10000")
        .set("fetch.max.bytes", "10000000")
        .create()
        .context("Kafka consumer creation failed")?;

    consumer
        .subscribe(&[topic])
        .with_context(|| format!("Failed to subscribe to `{topic}`"))?;

    info!(brokers, group_id, topic, "Kafka consumer initialized");
    Ok(consumer)
}
