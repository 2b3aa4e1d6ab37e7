use chrono::{DateTime, Utc};
use mongodb::bson::{self, Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Story as stored in MongoDB.
///
/// Fields default when absent so documents written by older clients still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(
        rename = "createdOn",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_on: Option<bson::DateTime>,
}

impl StoryDocument {
    /// New document with a fresh id and the current server time.
    pub fn new(input: CreateStory) -> Self {
        Self {
            id: ObjectId::new(),
            title: input.title,
            body: input.body,
            created_on: Some(bson::DateTime::now()),
        }
    }
}

/// Story as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// ObjectId as 24 hex characters
    #[schema(example = "64b7f0c2a1b2c3d4e5f60718")]
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_on: Option<DateTime<Utc>>,
}

impl From<StoryDocument> for Story {
    fn from(doc: StoryDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            title: doc.title,
            body: doc.body,
            created_on: doc
                .created_on
                .and_then(|at| DateTime::from_timestamp_millis(at.timestamp_millis())),
        }
    }
}

/// DTO for creating a story
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStory {
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "The long walk home")]
    pub title: String,
    #[validate(length(min = 1, max = 10000))]
    pub body: String,
}

/// DTO for updating a story. Empty strings are treated as absent.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStory {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 10000))]
    pub body: Option<String>,
}

impl UpdateStory {
    /// Drop fields that are present but empty.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.filter(|t| !t.is_empty()),
            body: self.body.filter(|b| !b.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }

    /// `$set` document of the fields to change.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(title) = &self.title {
            set.insert("title", title);
        }
        if let Some(body) = &self.body {
            set.insert("body", body);
        }
        doc! { "$set": set }
    }
}

/// `{message, data}` envelope for a list of stories
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoryListResponse {
    #[schema(example = "all stories")]
    pub message: String,
    pub data: Vec<Story>,
}

/// `{message, data}` envelope for a single story
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoryResponse {
    pub message: String,
    pub data: Story,
}

/// `{message}` acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "story deleted successfully")]
    pub message: String,
}
