use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The caller's query was unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding provider error: {0}")]
    EmbeddingProvider(String),

    #[error("Similarity provider error: {0}")]
    SimilarityProvider(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SearchResult<T> = Result<T, SearchError>;

impl SearchError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::InvalidInput(_) => "invalid_input",
            SearchError::EmbeddingProvider(_) => "embedding_provider",
            SearchError::SimilarityProvider(_) => "similarity_provider",
            SearchError::Config(_) => "config",
            SearchError::Internal(_) => "internal",
        }
    }
}

impl From<core_config::ConfigError> for SearchError {
    fn from(err: core_config::ConfigError) -> Self {
        SearchError::Config(err.to_string())
    }
}

/// Provider failures become 502 with a generic message; the detail stays in the logs.
impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidInput(msg) => AppError::BadRequest(msg),
            SearchError::EmbeddingProvider(message) => AppError::BadGateway {
                code: ErrorCode::EmbeddingProviderError,
                message,
            },
            SearchError::SimilarityProvider(message) => AppError::BadGateway {
                code: ErrorCode::SimilarityProviderError,
                message,
            },
            SearchError::Config(msg) => {
                AppError::InternalServerError(format!("Config error: {}", msg))
            }
            SearchError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
