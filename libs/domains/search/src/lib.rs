//! Search Domain
//!
//! Semantic search over stories: the query text is embedded by an embedding
//! provider and the vector is matched against a similarity index.
//!
//! ```text
//! GET /search?q=..
//!        │
//! ┌──────▼──────┐
//! │   Handler   │
//! └──────┬──────┘
//!        │
//! ┌──────▼────────┐   embed(model, text)   ┌──────────────────┐
//! │ SearchService │ ─────────────────────▶ │ EmbeddingProvider│  (OpenAI)
//! │               │   query(vector, topK)  ├──────────────────┤
//! │               │ ─────────────────────▶ │ SimilarityIndex  │  (Pinecone)
//! └───────────────┘                        └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_search::{
//!     OpenAIConfig, OpenAIProvider, PineconeConfig, PineconeIndex, SearchService, SearchSettings,
//!     handlers,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let embedder = OpenAIProvider::new(OpenAIConfig::from_env()?)?;
//! let index = PineconeIndex::connect(PineconeConfig::from_env()?).await?;
//!
//! let service = SearchService::new(
//!     Arc::new(embedder),
//!     Arc::new(index),
//!     SearchSettings::from_env()?,
//! );
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod embedding;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;
pub mod similarity;

pub use config::SearchSettings;
pub use embedding::{EmbeddingProvider, OpenAIConfig, OpenAIProvider};
pub use error::{SearchError, SearchResult};
pub use handlers::ApiDoc;
pub use models::{EmbeddingResult, Match, SearchParams, SimilarityQuery};
pub use service::SearchService;
pub use similarity::{PineconeConfig, PineconeIndex, SimilarityIndex};

#[cfg(any(test, feature = "mocks"))]
pub use embedding::MockEmbeddingProvider;
#[cfg(any(test, feature = "mocks"))]
pub use similarity::MockSimilarityIndex;
