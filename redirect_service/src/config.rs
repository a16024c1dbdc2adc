//! Redirect service configuration, read once from the environment at startup.
//!
//! - `PORT` - listen port (default: 3002)
//! - `REDIS_HOST` / `REDIS_PORT` - mapping store (default: localhost:6379)
//! - `KAFKA_BROKERS` / `KAFKA_TOPIC` - click log (default: localhost:9092, url-clicks)
//! - `LOOKUP_TIMEOUT_MS` - bound on a mapping lookup (default: 500)
//! - `HEALTH_TIMEOUT_MS` - bound on the health PING (default: 1000)
//! - `PUBLISH_TIMEOUT_MS` - Kafka delivery timeout per event (default: 5000)
//! - `PUBLISH_MAX_IN_FLIGHT` - unacknowledged Kafka deliveries awaited at once (default: 256)
//! - `CLICK_QUEUE_CAPACITY` - publish backlog before the oldest events are dropped,
//!   rounded up to the next power of two (default: 10000, effective 16384)

use crate::publisher::effective_capacity;
use anyhow::Result;
use shared::config::{KafkaSettings, RedisSettings, env_parse};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub redis: RedisSettings,
    pub kafka: KafkaSettings,
    pub lookup_timeout: Duration,
    pub health_timeout: Duration,
    pub publish_timeout: Duration,
    pub publish_max_in_flight: usize,
    /// Requested size; the queue rounds it up to a power of two.
    pub click_queue_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: env_parse("PORT", 3002)?,
            redis: RedisSettings::from_env()?,
            kafka: KafkaSettings::from_env()?,
            lookup_timeout: Duration::from_millis(env_parse("LOOKUP_TIMEOUT_MS", 500)?),
            health_timeout: Duration::from_millis(env_parse("HEALTH_TIMEOUT_MS", 1000)?),
            publish_timeout: Duration::from_millis(env_parse("PUBLISH_TIMEOUT_MS", 5000)?),
            publish_max_in_flight: env_parse("PUBLISH_MAX_IN_FLIGHT", 256)?,
            click_queue_capacity: env_parse("CLICK_QUEUE_CAPACITY", 10_000)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.click_queue_capacity == 0 || self.click_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "CLICK_QUEUE_CAPACITY must be between 1 and 1000000, got {}",
                self.click_queue_capacity
            );
        }

        if self.publish_max_in_flight == 0 || self.publish_max_in_flight > 10_000 {
            anyhow::bail!(
                "PUBLISH_MAX_IN_FLIGHT must be between 1 and 10000, got {}",
                self.publish_max_in_flight
            );
        }

        for (name, value) in [
            ("LOOKUP_TIMEOUT_MS", self.lookup_timeout),
            ("HEALTH_TIMEOUT_MS", self.health_timeout),
            ("PUBLISH_TIMEOUT_MS", self.publish_timeout),
        ] {
            if value.is_zero() {
                anyhow::bail!("{name} must be greater than 0");
            }
        }

        if self.kafka.topic.is_empty() {
            anyhow::bail!("KAFKA_TOPIC must not be empty");
        }

        Ok(())
    }

    pub fn print_summary(&self) {
        info!("Configuration loaded:");
        info!("  Listen port: {}", self.port);
        info!("  Redis: {}:{}", self.redis.host, self.redis.port);
        info!(
            "  Kafka: {}, topic: {}",
            self.kafka.bootstrap_servers(),
            self.kafka.topic
        );
        info!(
            "  Click queue capacity: {} (effective {})",
            self.click_queue_capacity,
            effective_capacity(self.click_queue_capacity)
        );
        info!("  Publish max in flight: {}", self.publish_max_in_flight);
    }
}

pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
