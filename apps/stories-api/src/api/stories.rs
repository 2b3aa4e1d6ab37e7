//! Stories API routes
//!
//! Wires the stories domain to the configured MongoDB collection.

use axum::Router;
use domain_stories::{MongoStoryRepository, StoryService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository =
        MongoStoryRepository::with_collection(state.db.clone(), &state.config.stories_collection);

    handlers::router(StoryService::new(repository))
}
