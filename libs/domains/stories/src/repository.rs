use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::StoryResult;
use crate::models::{CreateStory, Story, UpdateStory};

/// Data access for stories.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// All stories, newest first
    async fn list(&self) -> StoryResult<Vec<Story>>;

    async fn get_by_id(&self, id: ObjectId) -> StoryResult<Option<Story>>;

    /// Insert a story stamped with the server time
    async fn create(&self, input: CreateStory) -> StoryResult<Story>;

    /// Apply the non-empty fields of `input`; `None` when no story matched.
    async fn update(&self, id: ObjectId, input: UpdateStory) -> StoryResult<Option<Story>>;

    /// `false` when nothing was deleted
    async fn delete(&self, id: ObjectId) -> StoryResult<bool>;
}
