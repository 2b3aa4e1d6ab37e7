use async_trait::async_trait;

use crate::error::SearchResult;
use crate::models::EmbeddingResult;

/// Turns text into embedding vectors.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name for logs and metrics
    fn name(&self) -> &'static str;

    /// Embed a single text. Fails when the provider returns no vector.
    async fn embed(&self, model: &str, text: &str) -> SearchResult<EmbeddingResult>;

    /// Embed several texts; results keep the input order.
    async fn embed_batch(&self, model: &str, texts: &[String])
    -> SearchResult<Vec<EmbeddingResult>>;
}
