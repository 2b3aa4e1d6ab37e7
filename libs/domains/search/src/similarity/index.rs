use async_trait::async_trait;

use crate::error::SearchResult;
use crate::models::{Match, SimilarityQuery};

/// Nearest-neighbour lookup over stored vectors.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait SimilarityIndex: Send + Sync {
    /// Provider name for logs and metrics
    fn name(&self) -> &'static str;

    /// Matches in provider order; an absent match list is an empty `Vec`.
    async fn query(&self, query: SimilarityQuery) -> SearchResult<Vec<Match>>;
}
