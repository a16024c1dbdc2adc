pub mod config;
pub mod connection;
pub mod event;
pub mod health;
pub mod shutdown;
pub mod telemetry;

pub use connection::{DbPool, RedisPool, connect_db, connect_redis};
pub use event::ClickEvent;
pub use health::HealthResponse;
