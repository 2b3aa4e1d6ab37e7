use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Match {
    /// Identifier of the stored vector
    #[schema(example = "a")]
    pub id: String,
    /// Similarity score, higher is more similar
    #[schema(example = 0.91)]
    pub score: f32,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: Map<String, Value>,
}

/// Output of one embedding call.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingResult {
    pub values: Vec<f32>,
    pub dimension: u32,
    pub tokens_used: u32,
}

/// Nearest-neighbour request, serialized as the index's query body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityQuery {
    pub vector: Vec<f32>,
    pub top_k: u32,
    pub include_metadata: bool,
    pub include_values: bool,
    pub namespace: String,
}

impl SimilarityQuery {
    /// Metadata included, stored values excluded.
    pub fn new(vector: Vec<f32>, top_k: u32, namespace: impl Into<String>) -> Self {
        Self {
            vector,
            top_k,
            include_metadata: true,
            include_values: false,
            namespace: namespace.into(),
        }
    }
}

/// Query string of `GET /search`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Free-text query
    pub q: Option<String>,
}
