//! MongoDB implementation of StoryRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{doc, oid::ObjectId},
    options::ReturnDocument,
};
use tracing::instrument;

use crate::error::StoryResult;
use crate::models::{CreateStory, Story, StoryDocument, UpdateStory};
use crate::repository::StoryRepository;

/// Collection used when none is configured.
pub const DEFAULT_COLLECTION: &str = "posts";

pub struct MongoStoryRepository {
    collection: Collection<StoryDocument>,
}

impl MongoStoryRepository {
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<StoryDocument>(collection_name),
        }
    }
}

#[async_trait]
impl StoryRepository for MongoStoryRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> StoryResult<Vec<Story>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "_id": -1 }).await?;
        let documents: Vec<StoryDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Story::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> StoryResult<Option<Story>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(Story::from))
    }

    #[instrument(skip(self, input), fields(title_len = input.title.len()))]
    async fn create(&self, input: CreateStory) -> StoryResult<Story> {
        let document = StoryDocument::new(input);
        self.collection.insert_one(&document).await?;

        tracing::info!(story_id = %document.id, "Story created");
        Ok(document.into())
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: ObjectId, input: UpdateStory) -> StoryResult<Option<Story>> {
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, input.to_set_document())
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(story_id = %id, "Story updated");
        }
        Ok(updated.map(Story::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> StoryResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count > 0 {
            tracing::info!(story_id = %id, "Story deleted");
        }
        Ok(result.deleted_count > 0)
    }
}
