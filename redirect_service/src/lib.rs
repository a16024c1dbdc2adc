pub mod client_addr;
pub mod config;
pub mod error;
pub mod handlers;
pub mod publisher;
pub mod resolver;
pub mod routes;
pub mod state;
pub mod store;

pub const SERVICE_NAME: &str = "redirect-service";
