//! Environment helpers shared by every service binary.
//!
//! Values are read once at startup. An unset or empty variable falls back to
//! its default; a variable that is set but unparsable is an error.

use anyhow::{Context, Result};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

pub fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

pub fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("{key} has an invalid value `{value}`")),
        _ => Ok(default),
    }
}

/// Address of the key-value mapping store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
}

impl RedisSettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env_or("REDIS_HOST", "localhost"),
            port: env_parse("REDIS_PORT", 6379)?,
        })
    }

    pub fn url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

/// Broker list and topic of the click event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaSettings {
    pub brokers: Vec<String>,
    pub topic: String,
}

impl KafkaSettings {
    pub fn from_env() -> Result<Self> {
        let brokers: Vec<String> = env_or("KAFKA_BROKERS", "localhost:9092")
            .split(',')
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .collect();

        if brokers.is_empty() {
            anyhow::bail!("KAFKA_BROKERS must name at least one broker");
        }

        Ok(Self {
            brokers,
            topic: env_or("KAFKA_TOPIC", "url-clicks"),
        })
    }

    /// Broker list in the `bootstrap.servers` format.
    pub fn bootstrap_servers(&self) -> String {
        self.brokers.join(",")
    }
}
