pub mod config;
pub mod consumer;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod store;

pub const SERVICE_NAME: &str = "analytics-service";
