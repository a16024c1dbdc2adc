use crate::error::RedirectError;
use crate::store::{StoreError, UrlStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Resolves short codes against the mapping store. Read-only: resolving never
/// writes to the store.
pub struct Resolver {
    store: Arc<dyn UrlStore>,
    lookup_timeout: Duration,
    health_timeout: Duration,
}

impl Resolver {
    pub fn new(
        store: Arc<dyn UrlStore>,
        lookup_timeout: Duration,
        health_timeout: Duration,
    ) -> Self {
        Self {
            store,
            lookup_timeout,
            health_timeout,
        }
    }

    pub async fn resolve(&self, code: &str) -> Result<String, RedirectError> {
        let lookup = tokio::time::timeout(self.lookup_timeout, self.store.destination(code));

        match lookup.await {
            Ok(Ok(Some(url))) => Ok(url),
            Ok(Ok(None)) => {
                info!(short_code = code, "Short code not found");
                Err(RedirectError::NotFound)
            }
            Ok(Err(e)) => {
                error!(short_code = code, "Mapping store lookup failed: {}", e);
                Err(RedirectError::StoreUnavailable(e))
            }
            Err(_) => {
                let e = StoreError::Timeout(self.lookup_timeout);
                error!(short_code = code, "Mapping store lookup failed: {}", e);
                Err(RedirectError::StoreUnavailable(e))
            }
        }
    }

    /// Healthy iff the store answers a PING within the health timeout.
    pub async fn is_healthy(&self) -> bool {
        matches!(
            tokio::time::timeout(self.health_timeout, self.store.ping()).await,
            Ok(Ok(()))
        )
    }
}
