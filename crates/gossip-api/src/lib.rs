//! gossip-api — HTTP surface for the gossip exporter.
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/metrics` (configurable) | Prometheus exposition |
//!
//! Every scrape runs a fresh collection. Snapshot problems never turn into
//! HTTP errors; the worst case is an empty exposition.

pub mod handlers;

use std::time::Duration;

use axum::Router;
use axum::routing::get;
use prometheus::Registry;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub registry: Registry,
    pub collect_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Route serving the exposition. Must start with `/`.
    pub metrics_path: String,
    /// Upper bound on one collection before an empty response is served.
    pub collect_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            metrics_path: "/metrics".to_string(),
            collect_timeout: Duration::from_secs(61),
        }
    }
}

/// Build the router serving the registry's exposition.
pub fn build_router(registry: Registry, config: ApiConfig) -> Router {
    let state = ApiState {
        registry,
        collect_timeout: config.collect_timeout,
    };

    Router::new()
        .route(&config.metrics_path, get(handlers::prometheus_metrics))
        .with_state(state)
}
