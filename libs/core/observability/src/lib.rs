//! Observability utilities for the stories API.
//!
//! This crate provides:
//! - Prometheus recorder installation and the `/metrics` handler
//! - Axum middleware for per-route request metrics
//! - Domain recorders for story store operations and the search pipeline
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, SearchMetrics};
//!
//! init_metrics()?;
//!
//! SearchMetrics::record_outcome("ok");
//!
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod search;
pub mod stories;

pub use middleware::metrics_middleware;
pub use search::{SearchMetrics, SearchStage};
pub use stories::StoryMetrics;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder once per process.
///
/// Later calls return the handle installed by the first one.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;
        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();
        Ok(handle)
    })
}

pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for the /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP responses with 4xx or 5xx status"
    );

    describe_counter!(
        "story_operations_total",
        "Story store operations by operation and outcome"
    );

    describe_counter!("search_requests_total", "Search requests by outcome");
    describe_histogram!(
        "search_stage_duration_seconds",
        "Duration of each search pipeline stage in seconds"
    );
    describe_histogram!("search_matches", "Number of matches returned per search");
    describe_counter!(
        "search_embedding_tokens_total",
        "Tokens consumed by query embeddings"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_handler_before_init_reports_uninitialized() {
        if get_metrics_handle().is_none() {
            assert_eq!(metrics_handler().await, "# Metrics not initialized\n");
        }
    }
}
