#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::connect_info::MockConnectInfo;
use axum_test::TestServer;
use rdkafka::error::KafkaError;
use futures::FutureExt;
use redirect_service::publisher::{ClickPublisher, ClickSink, Delivery, PublishError};
use redirect_service::resolver::Resolver;
use redirect_service::routes::app_router;
use redirect_service::state::AppState;
use redirect_service::store::{StoreError, UrlStore};
use shared::ClickEvent;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const PEER: &str = "127.0.0.1:12345";

#[derive(Default)]
pub struct MemoryUrlStore {
    urls: Mutex<HashMap<String, String>>,
    down: AtomicBool,
    lookups: AtomicUsize,
}

impl MemoryUrlStore {
    pub fn with(code: &str, url: &str) -> Self {
        let store = Self::default();
        store.insert(code, url);
        store
    }

    pub fn insert(&self, code: &str, url: &str) {
        self.urls
            .lock()
            .unwrap()
            .insert(code.to_string(), url.to_string());
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UrlStore for MemoryUrlStore {
    async fn destination(&self, code: &str) -> Result<Option<String>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Other("connection refused".into()));
        }
        Ok(self.urls.lock().unwrap().get(code).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Other("connection refused".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ClickEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ClickEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Polls until `count` events arrived or a second has passed.
    pub async fn wait_for(&self, count: usize) -> Vec<ClickEvent> {
        for _ in 0..200 {
            if self.events.lock().unwrap().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.events()
    }
}

impl ClickSink for RecordingSink {
    fn enqueue(&self, event: &ClickEvent) -> Delivery {
        self.events.lock().unwrap().push(event.clone());
        async { Ok(()) }.boxed()
    }
}

/// A log that never acknowledges.
pub struct HangingSink;

impl ClickSink for HangingSink {
    fn enqueue(&self, _event: &ClickEvent) -> Delivery {
        std::future::pending().boxed()
    }
}

/// A log that rejects every write.
#[derive(Default)]
pub struct FailingSink {
    attempts: AtomicUsize,
}

impl FailingSink {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl ClickSink for FailingSink {
    fn enqueue(&self, _event: &ClickEvent) -> Delivery {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        async { Err(PublishError::Kafka(KafkaError::Canceled)) }.boxed()
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub publisher: ClickPublisher,
}

pub fn test_app(store: Arc<MemoryUrlStore>, sink: Arc<dyn ClickSink>) -> TestApp {
    let (publisher, _worker) = ClickPublisher::spawn(sink, 128, 16);
    let resolver = Resolver::new(store, Duration::from_millis(200), Duration::from_millis(200));
    let state = AppState::new(resolver, publisher.clone());

    let peer: SocketAddr = PEER.parse().unwrap();
    let app = app_router(state).layer(MockConnectInfo(peer));

    TestApp {
        server: TestServer::new(app).unwrap(),
        publisher,
    }
}

/// A log client that crashes the worker on first use.
pub struct PanickingSink;

impl ClickSink for PanickingSink {
    fn enqueue(&self, _event: &ClickEvent) -> Delivery {
        panic!("log client crashed");
    }
}
