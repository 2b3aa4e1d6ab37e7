use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};
use std::time::Duration;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_TOP_K: u32 = 20;
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Process-wide search settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    /// Embedding model identifier sent to the provider
    pub model: String,
    /// Index namespace; empty selects the default namespace
    pub namespace: String,
    pub top_k: u32,
    /// Deadline shared by the embed and query steps of one search
    pub timeout: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            namespace: String::new(),
            top_k: DEFAULT_TOP_K,
            timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }
}

impl FromEnv for SearchSettings {
    /// Reads from environment variables with defaults:
    /// - EMBEDDING_MODEL: text-embedding-ada-002
    /// - PINECONE_NAME_SPACE: empty
    /// - SEARCH_TOP_K: 20, at least 1
    /// - SEARCH_TIMEOUT_MS: 10000
    fn from_env() -> Result<Self, ConfigError> {
        let top_k = env_parse_or("SEARCH_TOP_K", DEFAULT_TOP_K)?;
        if top_k == 0 {
            return Err(ConfigError::ParseError {
                key: "SEARCH_TOP_K".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        let timeout_ms = env_parse_or("SEARCH_TIMEOUT_MS", 10_000u64)?;

        Ok(Self {
            model: env_or_default("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            namespace: env_or_default("PINECONE_NAME_SPACE", ""),
            top_k,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}
