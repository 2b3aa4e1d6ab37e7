//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social Stories API",
        version = "0.1.0",
        description = "Story CRUD over MongoDB and semantic story search"
    ),
    servers(
        (url = "http://localhost:5001", description = "Local development server")
    ),
    nest(
        (path = "/api/v1", api = domain_stories::ApiDoc),
        (path = "/api/v1", api = domain_search::ApiDoc)
    ),
    tags(
        (name = "Stories", description = "Story management endpoints (MongoDB)"),
        (name = "Search", description = "Semantic search over stories")
    )
)]
pub struct ApiDoc;
