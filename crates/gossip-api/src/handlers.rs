//! Scrape handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{debug, warn};

use gossip_metrics::{CONTENT_TYPE, render_prometheus};

use crate::ApiState;

/// GET /metrics
///
/// Collection runs on the blocking pool, bounded by the configured timeout.
/// A failed, timed-out or panicked collection yields an empty 200 response.
pub async fn prometheus_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let registry = state.registry.clone();
    let task = tokio::task::spawn_blocking(move || render_prometheus(&registry));

    let body = match tokio::time::timeout(state.collect_timeout, task).await {
        Ok(Ok(Ok(body))) => {
            debug!(bytes = body.len(), "scrape served");
            body
        }
        Ok(Ok(Err(e))) => {
            warn!(error = %e, "metrics encoding failed");
            String::new()
        }
        Ok(Err(e)) => {
            warn!(error = %e, "metrics collection task failed");
            String::new()
        }
        Err(_) => {
            warn!(
                timeout_ms = state.collect_timeout.as_millis() as u64,
                "metrics collection timed out"
            );
            String::new()
        }
    };

    (StatusCode::OK, [("content-type", CONTENT_TYPE)], body)
}
