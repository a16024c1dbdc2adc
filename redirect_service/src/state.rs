use crate::publisher::ClickPublisher;
use crate::resolver::Resolver;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub publisher: ClickPublisher,
}

impl AppState {
    pub fn new(resolver: Resolver, publisher: ClickPublisher) -> Self {
        Self {
            resolver: Arc::new(resolver),
            publisher,
        }
    }
}
