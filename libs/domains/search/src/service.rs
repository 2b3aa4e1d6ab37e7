//! Search Orchestrator: query text → embedding → nearest neighbours

use observability::{SearchMetrics, SearchStage};
use std::future::Future;
use std::sync::Arc;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, instrument, warn};

use crate::config::SearchSettings;
use crate::embedding::EmbeddingProvider;
use crate::error::{SearchError, SearchResult};
use crate::models::{EmbeddingResult, Match, SimilarityQuery};
use crate::similarity::SimilarityIndex;

pub const EMPTY_QUERY_MESSAGE: &str = "query text must not be empty";

#[derive(Clone)]
pub struct SearchService {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn SimilarityIndex>,
    settings: SearchSettings,
}

impl SearchService {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn SimilarityIndex>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            embedder,
            index,
            settings,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Embed `query_text` and return the index's matches in provider order.
    ///
    /// Both provider calls share one deadline of `settings.timeout`. No retries.
    #[instrument(skip(self), fields(model = %self.settings.model, top_k = self.settings.top_k))]
    pub async fn search(&self, query_text: &str) -> SearchResult<Vec<Match>> {
        let result = self.run(query_text).await;

        match &result {
            Ok(matches) => {
                SearchMetrics::record_outcome("ok");
                SearchMetrics::record_matches(matches.len());
            }
            Err(e) => {
                SearchMetrics::record_outcome(e.kind());
                warn!(error = %e, "Search failed");
            }
        }

        result
    }

    async fn run(&self, query_text: &str) -> SearchResult<Vec<Match>> {
        let text = query_text.trim();
        if text.is_empty() {
            return Err(SearchError::InvalidInput(EMPTY_QUERY_MESSAGE.to_string()));
        }

        let deadline = Instant::now() + self.settings.timeout;

        let embedding = self.embed(text, deadline).await?;
        let query = SimilarityQuery::new(
            embedding.values,
            self.settings.top_k,
            self.settings.namespace.clone(),
        );
        let matches = self.query(query, deadline).await?;

        for m in &matches {
            debug!(
                id = %m.id,
                score = %format!("{:.3}", m.score),
                metadata = ?m.metadata,
                "match"
            );
        }
        info!(count = matches.len(), "Search returned matches");

        Ok(matches)
    }

    async fn embed(&self, text: &str, deadline: Instant) -> SearchResult<EmbeddingResult> {
        let call = self.embedder.embed(&self.settings.model, text);
        let embedding = self.stage(SearchStage::Embedding, deadline, call).await?;

        if embedding.values.is_empty() {
            return Err(SearchError::EmbeddingProvider(
                "provider returned no embedding vector".to_string(),
            ));
        }

        SearchMetrics::record_embedding_tokens(&self.settings.model, embedding.tokens_used);
        debug!(dimension = embedding.dimension, "Query embedded");
        Ok(embedding)
    }

    async fn query(&self, query: SimilarityQuery, deadline: Instant) -> SearchResult<Vec<Match>> {
        let call = self.index.query(query);
        self.stage(SearchStage::Similarity, deadline, call).await
    }

    /// Run one provider call against the shared deadline, attributing any
    /// failure to `stage`.
    async fn stage<T>(
        &self,
        stage: SearchStage,
        deadline: Instant,
        call: impl Future<Output = SearchResult<T>>,
    ) -> SearchResult<T> {
        let started = Instant::now();
        let outcome = timeout_at(deadline, call).await;
        SearchMetrics::record_stage_duration(stage, started.elapsed());

        match outcome {
            Ok(result) => result.map_err(|e| attribute(stage, e)),
            Err(_) => Err(attribute(
                stage,
                SearchError::Internal(format!(
                    "deadline of {}ms exceeded",
                    self.settings.timeout.as_millis()
                )),
            )),
        }
    }
}

/// Map an error raised while `stage` was running onto that stage's provider error.
fn attribute(stage: SearchStage, err: SearchError) -> SearchError {
    match (stage, err) {
        (SearchStage::Embedding, e @ SearchError::EmbeddingProvider(_)) => e,
        (SearchStage::Similarity, e @ SearchError::SimilarityProvider(_)) => e,
        (SearchStage::Embedding, e) => SearchError::EmbeddingProvider(e.to_string()),
        (SearchStage::Similarity, e) => SearchError::SimilarityProvider(e.to_string()),
    }
}
