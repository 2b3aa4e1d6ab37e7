//! End-to-end search: real OpenAI and Pinecone clients against stubbed APIs,
//! driven through the HTTP router.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_search::{
    OpenAIConfig, OpenAIProvider, PineconeConfig, PineconeIndex, SearchService, SearchSettings,
    handlers,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request as StubRequest, ResponseTemplate};

const ADA_DIMENSION: usize = 1536;

/// Matches a query body whose `vector` has the given length.
struct VectorLen(usize);

impl wiremock::Match for VectorLen {
    fn matches(&self, request: &StubRequest) -> bool {
        serde_json::from_slice::<Value>(&request.body)
            .ok()
            .and_then(|body| body["vector"].as_array().map(Vec::len))
            == Some(self.0)
    }
}

async fn stub_openai() -> MockServer {
    let server = MockServer::start().await;
    let embedding: Vec<f32> = (0..ADA_DIMENSION).map(|i| i as f32 / 10_000.0).collect();

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "text-embedding-ada-002",
            "input": ["friendship story"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{"object": "embedding", "index": 0, "embedding": embedding}],
            "model": "text-embedding-ada-002",
            "usage": {"prompt_tokens": 2, "total_tokens": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    server
}

async fn stub_pinecone(matches: Value) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .and(header("api-key", "pc-test"))
        .and(body_partial_json(json!({
            "topK": 20,
            "includeMetadata": true,
            "includeValues": false,
            "namespace": ""
        })))
        .and(VectorLen(ADA_DIMENSION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matches": matches,
            "namespace": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    server
}

async fn app(openai: &MockServer, pinecone: &MockServer) -> axum::Router {
    let embedder =
        OpenAIProvider::new(OpenAIConfig::new("sk-test").with_base_url(openai.uri())).unwrap();
    let index = PineconeIndex::connect(
        PineconeConfig::new("pc-test", "stories").with_index_host(pinecone.uri()),
    )
    .await
    .unwrap();

    handlers::router(SearchService::new(
        Arc::new(embedder),
        Arc::new(index),
        SearchSettings::default(),
    ))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_friendship_story_returns_provider_matches_in_order() {
    let expected = json!([
        {"id": "a", "score": 0.91, "metadata": {"title": "X"}},
        {"id": "b", "score": 0.80, "metadata": {"title": "Y"}}
    ]);
    let openai = stub_openai().await;
    let pinecone = stub_pinecone(expected.clone()).await;

    let (status, body) = get_json(
        app(&openai, &pinecone).await,
        "/search?q=friendship%20story",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);
}

#[tokio::test]
async fn test_null_matches_returns_empty_array() {
    let openai = stub_openai().await;
    let pinecone = stub_pinecone(Value::Null).await;

    let (status, body) = get_json(
        app(&openai, &pinecone).await,
        "/search?q=friendship+story",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_embedding_outage_is_502_and_index_untouched() {
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&openai)
        .await;
    let pinecone = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&pinecone)
        .await;

    let (status, body) = get_json(app(&openai, &pinecone).await, "/search?q=anything").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "EMBEDDING_PROVIDER_ERROR");
}
