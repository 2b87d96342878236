//! Shared server state.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use tokio::sync::broadcast;
use trajview_core::api::Loader;

/// Cloned into every handler; the loader and stats are shared.
#[derive(Clone)]
pub struct AppState {
    pub session_id: String,
    pub loader: Loader,
    pub stats: Arc<RwLock<ServerStats>>,
    /// In-process stop handle for the running server.
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(session_id: String, loader: Loader, shutdown_tx: broadcast::Sender<()>) -> Self {
        Self {
            session_id,
            loader,
            stats: Arc::new(RwLock::new(ServerStats::new())),
            shutdown_tx,
        }
    }

    /// Counts one request against `route`.
    pub fn record_request(&self, route: &str) {
        self.stats
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .increment_request(route);
    }

    /// Counts one failed request.
    pub fn record_error(&self) {
        self.stats
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .increment_error();
    }
}

/// Request counters reported by `/health`.
#[derive(Debug)]
pub struct ServerStats {
    started_at: Instant,
    pub requests_total: u64,
    pub errors_total: u64,
    pub requests_by_route: HashMap<String, u64>,
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            requests_total: 0,
            errors_total: 0,
            requests_by_route: HashMap::new(),
        }
    }

    pub fn increment_request(&mut self, route: &str) {
        self.requests_total += 1;
        *self.requests_by_route.entry(route.to_string()).or_insert(0) += 1;
    }

    pub fn increment_error(&mut self) {
        self.errors_total += 1;
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}
