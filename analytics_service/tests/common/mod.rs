#![allow(dead_code)]

use analytics_service::routes::app_router;
use analytics_service::state::AppState;
use analytics_service::store::{ClickStore, ClickStoreError, CodeStats};
use async_trait::async_trait;
use axum_test::TestServer;
use shared::ClickEvent;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct MemoryClickStore {
    clicks: Mutex<Vec<ClickEvent>>,
    down: AtomicBool,
    stalled: AtomicBool,
}

impl MemoryClickStore {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// Pings never answer, like a hung database.
    pub fn set_stalled(&self, stalled: bool) {
        self.stalled.store(stalled, Ordering::SeqCst);
    }

    pub fn clicks(&self) -> Vec<ClickEvent> {
        self.clicks.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ClickStoreError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(ClickStoreError::Other("database unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ClickStore for MemoryClickStore {
    async fn record(&self, event: &ClickEvent) -> Result<(), ClickStoreError> {
        self.check()?;
        self.clicks.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn stats_for(&self, short_code: &str) -> Result<CodeStats, ClickStoreError> {
        self.check()?;
        let clicks = self.clicks.lock().unwrap();
        let matching = clicks.iter().filter(|c| c.short_code == short_code);

        Ok(CodeStats {
            short_code: short_code.to_string(),
            total_clicks: matching.clone().count() as i64,
            last_click: matching.map(|c| c.timestamp).max(),
        })
    }

    async fn all_stats(&self) -> Result<Vec<CodeStats>, ClickStoreError> {
        self.check()?;
        let mut grouped: BTreeMap<String, CodeStats> = BTreeMap::new();
        for click in self.clicks.lock().unwrap().iter() {
            let entry = grouped
                .entry(click.short_code.clone())
                .or_insert_with(|| CodeStats {
                    short_code: click.short_code.clone(),
                    total_clicks: 0,
                    last_click: None,
                });
            entry.total_clicks += 1;
            entry.last_click = entry.last_click.max(Some(click.timestamp));
        }

        let mut stats: Vec<CodeStats> = grouped.into_values().collect();
        stats.sort_by(|a, b| {
            b.total_clicks
                .cmp(&a.total_clicks)
                .then_with(|| a.short_code.cmp(&b.short_code))
        });
        Ok(stats)
    }

    async fn ping(&self) -> bool {
        if self.stalled.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        !self.down.load(Ordering::SeqCst)
    }
}

pub fn test_server(store: Arc<MemoryClickStore>) -> TestServer {
    TestServer::new(app_router(AppState {
        store,
        health_timeout: Duration::from_millis(100),
    }))
    .unwrap()
}

/// A record as the redirect service puts it on the click topic.
pub fn click_payload(short_code: &str, timestamp: &str) -> Vec<u8> {
    format!(
        r#"{{"shortCode":"{short_code}","timestamp":"{timestamp}","userAgent":"TestBot/1.0","ip":"127.0.0.1:12345"}}"#
    )
    .into_bytes()
}
