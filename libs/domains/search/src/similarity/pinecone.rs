use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or, env_required};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use super::SimilarityIndex;
use crate::error::{SearchError, SearchResult};
use crate::models::{Match, SimilarityQuery};

pub const DEFAULT_CONTROLLER_URL: &str = "https://api.pinecone.io";

#[derive(Debug, Clone)]
pub struct PineconeConfig {
    pub api_key: String,
    pub index_name: String,
    /// Data-plane host; looked up from the control plane when `None`
    pub index_host: Option<String>,
    pub controller_url: String,
    /// Per-request HTTP timeout
    pub timeout: Duration,
}

impl PineconeConfig {
    pub fn new(api_key: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            index_name: index_name.into(),
            index_host: None,
            controller_url: DEFAULT_CONTROLLER_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_index_host(mut self, host: impl Into<String>) -> Self {
        self.index_host = Some(host.into());
        self
    }

    pub fn with_controller_url(mut self, url: impl Into<String>) -> Self {
        self.controller_url = url.into();
        self
    }
}

/// `PINECONE_API_KEY`, `PINECONE_INDEX_NAME` (required), `PINECONE_INDEX_HOST`,
/// `PINECONE_CONTROLLER_URL`, `PROVIDER_TIMEOUT_SECS` (default 30).
impl FromEnv for PineconeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("PINECONE_API_KEY")?,
            index_name: env_required("PINECONE_INDEX_NAME")?,
            index_host: std::env::var("PINECONE_INDEX_HOST")
                .ok()
                .filter(|h| !h.trim().is_empty()),
            controller_url: env_or_default("PINECONE_CONTROLLER_URL", DEFAULT_CONTROLLER_URL),
            timeout: Duration::from_secs(env_parse_or("PROVIDER_TIMEOUT_SECS", 30)?),
        })
    }
}

/// Pinecone data-plane client bound to one index
pub struct PineconeIndex {
    client: Client,
    api_key: String,
    host: String,
}

#[derive(Debug, Deserialize)]
struct DescribeIndexResponse {
    host: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Option<Vec<Match>>,
}

impl PineconeIndex {
    /// Build the client, resolving the index host from the control plane if it
    /// is not configured.
    pub async fn connect(config: PineconeConfig) -> SearchResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let host = match &config.index_host {
            Some(host) => host.clone(),
            None => describe_index_host(&client, &config).await?,
        };
        let host = normalize_host(&host);
        info!(index = %config.index_name, host = %host, "Pinecone index ready");

        Ok(Self {
            client,
            api_key: config.api_key,
            host,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

async fn describe_index_host(client: &Client, config: &PineconeConfig) -> SearchResult<String> {
    let url = format!(
        "{}/indexes/{}",
        config.controller_url.trim_end_matches('/'),
        config.index_name
    );

    let response = client
        .get(url)
        .header("Api-Key", &config.api_key)
        .send()
        .await
        .map_err(|e| SearchError::SimilarityProvider(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(SearchError::SimilarityProvider(format!(
            "describe index '{}' failed ({}): {}",
            config.index_name, status, error_text
        )));
    }

    let body: DescribeIndexResponse = response
        .json()
        .await
        .map_err(|e| SearchError::SimilarityProvider(format!("malformed response: {}", e)))?;
    Ok(body.host)
}

/// The control plane reports bare hostnames; the data plane is always HTTPS.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

#[async_trait]
impl SimilarityIndex for PineconeIndex {
    fn name(&self) -> &'static str {
        "pinecone"
    }

    async fn query(&self, query: SimilarityQuery) -> SearchResult<Vec<Match>> {
        let response = self
            .client
            .post(format!("{}/query", self.host))
            .header("Api-Key", &self.api_key)
            .json(&query)
            .send()
            .await
            .map_err(|e| SearchError::SimilarityProvider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SearchError::SimilarityProvider(format!(
                "Pinecone API error ({}): {}",
                status, error_text
            )));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| SearchError::SimilarityProvider(format!("malformed response: {}", e)))?;

        Ok(body.matches.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn index(server: &MockServer) -> PineconeIndex {
        PineconeIndex::connect(PineconeConfig::new("pc-key", "stories").with_index_host(server.uri()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_query_sends_camel_case_body_with_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .and(header("api-key", "pc-key"))
            .and(body_json(json!({
                "vector": [0.5, 0.25],
                "topK": 20,
                "includeMetadata": true,
                "includeValues": false,
                "namespace": "posts"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "matches": [
                    {"id": "a", "score": 0.91, "values": [], "metadata": {"title": "X"}},
                    {"id": "b", "score": 0.80, "values": [], "metadata": {"title": "Y"}}
                ],
                "namespace": "posts"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let matches = index(&server)
            .await
            .query(SimilarityQuery::new(vec![0.5, 0.25], 20, "posts"))
            .await
            .unwrap();

        let ids: Vec<_> = matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(matches[0].metadata["title"], "X");
    }

    #[tokio::test]
    async fn test_null_or_missing_matches_is_empty() {
        for body in [json!({"matches": null}), json!({})] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/query"))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(&server)
                .await;

            let matches = index(&server)
                .await
                .query(SimilarityQuery::new(vec![1.0], 5, ""))
                .await
                .unwrap();
            assert!(matches.is_empty());
        }
    }

    #[tokio::test]
    async fn test_server_error_is_similarity_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = index(&server)
            .await
            .query(SimilarityQuery::new(vec![1.0], 5, ""))
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::SimilarityProvider(_)));
    }

    #[tokio::test]
    async fn test_connect_resolves_host_from_control_plane() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/indexes/stories"))
            .and(header("api-key", "pc-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"name": "stories", "host": "stories-abc.svc.pinecone.io"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let index = PineconeIndex::connect(
            PineconeConfig::new("pc-key", "stories").with_controller_url(server.uri()),
        )
        .await
        .unwrap();

        assert_eq!(index.host(), "https://stories-abc.svc.pinecone.io");
    }

    #[tokio::test]
    async fn test_connect_fails_for_unknown_index() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = PineconeIndex::connect(
            PineconeConfig::new("pc-key", "missing").with_controller_url(server.uri()),
        )
        .await;

        assert!(matches!(result, Err(SearchError::SimilarityProvider(_))));
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("idx.svc.io/"), "https://idx.svc.io");
        assert_eq!(normalize_host("http://127.0.0.1:9000"), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_config_from_env_treats_blank_host_as_unset() {
        temp_env::with_vars(
            [
                ("PINECONE_API_KEY", Some("pc-key")),
                ("PINECONE_INDEX_NAME", Some("stories")),
                ("PINECONE_INDEX_HOST", Some("  ")),
                ("PINECONE_CONTROLLER_URL", None),
            ],
            || {
                let config = PineconeConfig::from_env().unwrap();
                assert_eq!(config.index_name, "stories");
                assert!(config.index_host.is_none());
                assert_eq!(config.controller_url, DEFAULT_CONTROLLER_URL);
            },
        );
    }
}
