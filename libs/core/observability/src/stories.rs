//! Story store metrics.

use metrics::counter;

pub struct StoryMetrics;

impl StoryMetrics {
    /// `operation` is one of list/get/create/update/delete; `outcome` is
    /// `ok`, `not_found` or `error`.
    pub fn record_operation(operation: &'static str, outcome: &'static str) {
        counter!(
            "story_operations_total",
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
    }
}
