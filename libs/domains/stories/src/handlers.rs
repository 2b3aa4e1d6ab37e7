use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, InvalidIdResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::StoryResult;
use crate::extractors::StoryIdPath;
use crate::models::{
    CreateStory, MessageResponse, Story, StoryListResponse, StoryResponse, UpdateStory,
};
use crate::repository::StoryRepository;
use crate::service::StoryService;

/// OpenAPI documentation for the Stories API
#[derive(OpenApi)]
#[openapi(
    paths(list_stories, create_story, get_story, update_story, delete_story),
    components(
        schemas(Story, CreateStory, UpdateStory, StoryListResponse, StoryResponse, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InvalidIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Stories", description = "Story management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Routes `/stories` and `/story[/{id}]`, meant to be nested under the API prefix.
pub fn router<R: StoryRepository + 'static>(service: StoryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/stories", get(list_stories))
        .route("/story", post(create_story))
        .route(
            "/story/{id}",
            get(get_story).put(update_story).delete(delete_story),
        )
        .with_state(shared_service)
}

/// List all stories, newest first
#[utoipa::path(
    get,
    path = "/stories",
    tag = "Stories",
    responses(
        (status = 200, description = "All stories", body = StoryListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_stories<R: StoryRepository>(
    State(service): State<Arc<StoryService<R>>>,
) -> StoryResult<Json<StoryListResponse>> {
    let stories = service.list_stories().await?;
    Ok(Json(StoryListResponse {
        message: "all stories".to_string(),
        data: stories,
    }))
}

/// Create a story
#[utoipa::path(
    post,
    path = "/story",
    tag = "Stories",
    request_body = CreateStory,
    responses(
        (status = 201, description = "Story created", body = StoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_story<R: StoryRepository>(
    State(service): State<Arc<StoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateStory>,
) -> StoryResult<impl IntoResponse> {
    let story = service.create_story(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(StoryResponse {
            message: "created story".to_string(),
            data: story,
        }),
    ))
}

/// Get a story by id
#[utoipa::path(
    get,
    path = "/story/{id}",
    tag = "Stories",
    params(
        ("id" = String, Path, description = "Story ObjectId (24 hex chars)")
    ),
    responses(
        (status = 200, description = "Story found", body = StoryResponse),
        (status = 403, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_story<R: StoryRepository>(
    State(service): State<Arc<StoryService<R>>>,
    StoryIdPath(id): StoryIdPath,
) -> StoryResult<Json<StoryResponse>> {
    let story = service.get_story(id).await?;
    Ok(Json(StoryResponse {
        message: "story found".to_string(),
        data: story,
    }))
}

/// Update a story's title and/or body
#[utoipa::path(
    put,
    path = "/story/{id}",
    tag = "Stories",
    params(
        ("id" = String, Path, description = "Story ObjectId (24 hex chars)")
    ),
    request_body = UpdateStory,
    responses(
        (status = 200, description = "Story updated", body = StoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_story<R: StoryRepository>(
    State(service): State<Arc<StoryService<R>>>,
    StoryIdPath(id): StoryIdPath,
    ValidatedJson(input): ValidatedJson<UpdateStory>,
) -> StoryResult<Json<StoryResponse>> {
    let story = service.update_story(id, input).await?;
    Ok(Json(StoryResponse {
        message: "story updated successfully".to_string(),
        data: story,
    }))
}

/// Delete a story
#[utoipa::path(
    delete,
    path = "/story/{id}",
    tag = "Stories",
    params(
        ("id" = String, Path, description = "Story ObjectId (24 hex chars)")
    ),
    responses(
        (status = 200, description = "Story deleted", body = MessageResponse),
        (status = 403, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_story<R: StoryRepository>(
    State(service): State<Arc<StoryService<R>>>,
    StoryIdPath(id): StoryIdPath,
) -> StoryResult<Json<MessageResponse>> {
    service.delete_story(id).await?;
    Ok(Json(MessageResponse {
        message: "story deleted successfully".to_string(),
    }))
}
