use crate::store::ClickStore;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ClickStore>,
    /// Bound on the database ping behind `/health`.
    pub health_timeout: Duration,
}
