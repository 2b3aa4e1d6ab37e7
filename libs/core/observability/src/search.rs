//! Search pipeline metrics.

use metrics::{counter, histogram};
use std::time::Duration;

/// Stage of the search pipeline a measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    Embedding,
    Similarity,
}

impl SearchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Embedding => "embedding",
            Self::Similarity => "similarity",
        }
    }
}

/// Search metrics recorder
pub struct SearchMetrics;

impl SearchMetrics {
    /// Count one finished search. `outcome` is `ok` or the failing error kind.
    pub fn record_outcome(outcome: &'static str) {
        counter!("search_requests_total", "outcome" => outcome).increment(1);
    }

    pub fn record_stage_duration(stage: SearchStage, elapsed: Duration) {
        histogram!("search_stage_duration_seconds", "stage" => stage.as_str())
            .record(elapsed.as_secs_f64());
    }

    pub fn record_matches(count: usize) {
        histogram!("search_matches").record(count as f64);
    }

    pub fn record_embedding_tokens(model: &str, tokens: u32) {
        counter!("search_embedding_tokens_total", "model" => model.to_string())
            .increment(u64::from(tokens));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_search_metrics_render_with_labels() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            SearchMetrics::record_outcome("ok");
            SearchMetrics::record_outcome("embedding_provider");
            SearchMetrics::record_stage_duration(SearchStage::Similarity, Duration::from_millis(40));
            SearchMetrics::record_matches(3);
            SearchMetrics::record_embedding_tokens("text-embedding-ada-002", 7);
        });

        let rendered = handle.render();
        assert!(rendered.contains("search_requests_total{outcome=\"ok\"} 1"));
        assert!(rendered.contains("outcome=\"embedding_provider\""));
        assert!(rendered.contains("stage=\"similarity\""));
        assert!(rendered.contains("search_embedding_tokens_total{model=\"text-embedding-ada-002\"} 7"));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        SearchMetrics::record_outcome("ok");
        SearchMetrics::record_matches(0);
    }
}
