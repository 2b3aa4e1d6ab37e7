//! Story Service - validation and metrics around the repository

use mongodb::bson::oid::ObjectId;
use observability::StoryMetrics;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{StoryError, StoryResult};
use crate::models::{CreateStory, Story, UpdateStory};
use crate::repository::StoryRepository;

pub struct StoryService<R: StoryRepository> {
    repository: Arc<R>,
}

impl<R: StoryRepository> StoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_stories(&self) -> StoryResult<Vec<Story>> {
        let result = self.repository.list().await;
        record("list", &result);
        result
    }

    #[instrument(skip(self))]
    pub async fn get_story(&self, id: ObjectId) -> StoryResult<Story> {
        let result = self
            .repository
            .get_by_id(id)
            .await
            .and_then(|story| story.ok_or(StoryError::NotFound(id)));
        record("get", &result);
        result
    }

    #[instrument(skip(self, input))]
    pub async fn create_story(&self, input: CreateStory) -> StoryResult<Story> {
        input
            .validate()
            .map_err(|e| StoryError::Validation(e.to_string()))?;

        let result = self.repository.create(input).await;
        record("create", &result);
        result
    }

    #[instrument(skip(self, input))]
    pub async fn update_story(&self, id: ObjectId, input: UpdateStory) -> StoryResult<Story> {
        input
            .validate()
            .map_err(|e| StoryError::Validation(e.to_string()))?;

        let changes = input.normalized();
        if changes.is_empty() {
            return Err(StoryError::Validation(
                "provide a non-empty title or body to update".to_string(),
            ));
        }

        let result = self
            .repository
            .update(id, changes)
            .await
            .and_then(|story| story.ok_or(StoryError::NotFound(id)));
        record("update", &result);
        result
    }

    #[instrument(skip(self))]
    pub async fn delete_story(&self, id: ObjectId) -> StoryResult<()> {
        let result = match self.repository.delete(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(StoryError::NotFound(id)),
            Err(e) => Err(e),
        };
        record("delete", &result);
        result
    }
}

impl<R: StoryRepository> Clone for StoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn record<T>(operation: &'static str, result: &StoryResult<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(StoryError::NotFound(_)) => "not_found",
        Err(_) => "error",
    };
    StoryMetrics::record_operation(operation, outcome);
}
