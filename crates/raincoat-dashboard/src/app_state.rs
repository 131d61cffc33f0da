//! Shared application state for the raincoat dashboard.
//!
//! - Holds the process-wide metrics registry, the order store handle, and the
//!   transfer job.
//! - Startup errors are explicit (Result instead of panic).

use std::sync::Arc;

use raincoat_core::error::Result;

use crate::config::DashboardConfig;
use crate::obs::DashboardMetrics;
use crate::store::OrderStore;
use crate::transfer::SftpPusher;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<DashboardMetrics>,
}

struct AppStateInner {
    store: OrderStore,
    pusher: SftpPusher,
}

impl AppState {
    /// Build application state and make sure the store is ready to serve.
    pub fn new(cfg: DashboardConfig) -> Result<Self> {
        let store = OrderStore::new(cfg.store.path.clone());
        let seeded = store.ensure_initialized()?;
        tracing::info!(path = %store.path().display(), seeded, "order store ready");

        let pusher = SftpPusher::new(cfg.transfer.clone());
        if pusher.target().trust_unknown_host_keys {
            tracing::warn!(host = %cfg.transfer.host, "transfer accepts unknown host keys");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { store, pusher }),
            metrics: Arc::new(DashboardMetrics::new()),
        })
    }

    pub fn store(&self) -> &OrderStore {
        &self.inner.store
    }

    pub fn pusher(&self) -> &SftpPusher {
        &self.inner.pusher
    }

    pub fn metrics(&self) -> &DashboardMetrics {
        &self.metrics
    }
}
