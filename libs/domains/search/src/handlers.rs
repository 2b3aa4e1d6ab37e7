use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use axum_helpers::{
    AppError,
    errors::responses::{BadGatewayResponse, BadRequestQueryResponse, InternalServerErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{Match, SearchParams};
use crate::service::SearchService;

/// OpenAPI documentation for the Search API
#[derive(OpenApi)]
#[openapi(
    paths(search),
    components(
        schemas(Match),
        responses(BadRequestQueryResponse, BadGatewayResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Search", description = "Semantic search over stories (OpenAI embeddings + Pinecone)")
    )
)]
pub struct ApiDoc;

/// Route `/search`, meant to be nested under the API prefix.
pub fn router(service: SearchService) -> Router {
    Router::new()
        .route("/search", get(search))
        .with_state(Arc::new(service))
}

/// Semantic search
///
/// Embeds `q` and returns the nearest stories, most similar first.
#[utoipa::path(
    get,
    path = "/search",
    tag = "Search",
    params(SearchParams),
    responses(
        (status = 200, description = "Ranked matches", body = [Match]),
        (status = 400, response = BadRequestQueryResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search(
    State(service): State<Arc<SearchService>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Match>>, AppError> {
    let Query(params) = params?;
    let matches = service.search(params.q.as_deref().unwrap_or_default()).await?;
    Ok(Json(matches))
}
