use async_trait::async_trait;
use redis::AsyncCommands;
use shared::RedisPool;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Mapping store did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Mapping store error: {0}")]
    Other(String),
}

/// Read side of the short code -> destination mapping.
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// `Ok(None)` means the code is unknown.
    async fn destination(&self, code: &str) -> Result<Option<String>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

pub fn mapping_key(code: &str) -> String {
    format!("url:{code}")
}

pub struct RedisUrlStore {
    conn: RedisPool,
}

impl RedisUrlStore {
    pub fn new(conn: RedisPool) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UrlStore for RedisUrlStore {
    async fn destination(&self, code: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let url = conn.get::<_, Option<String>>(mapping_key(code)).await?;
        Ok(url)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }
}
