//! Stories Domain
//!
//! CRUD over user-authored stories kept in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/stories, /story/{id})
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, metrics
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Stored document, API shape, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_stories::{handlers, MongoStoryRepository, StoryService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("socialstories");
//!
//! let repository = MongoStoryRepository::with_collection(db, "posts");
//! let service = StoryService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{StoryError, StoryResult};
pub use extractors::StoryIdPath;
pub use handlers::ApiDoc;
pub use models::{CreateStory, Story, StoryDocument, UpdateStory};
pub use self::mongodb::MongoStoryRepository;
pub use repository::StoryRepository;
pub use service::StoryService;

#[cfg(any(test, feature = "mocks"))]
pub use repository::MockStoryRepository;
