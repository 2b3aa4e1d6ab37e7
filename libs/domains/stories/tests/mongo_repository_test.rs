//! Repository tests against a live MongoDB.
//!
//! Run with `MONGODB_URL=mongodb://localhost:27017 cargo test -- --ignored`.

use domain_stories::{CreateStory, MongoStoryRepository, StoryRepository, UpdateStory};
use mongodb::{Client, bson::oid::ObjectId};

async fn repository(test_name: &str) -> MongoStoryRepository {
    let url =
        std::env::var("MONGODB_URL").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let client = Client::with_uri_str(url).await.unwrap();
    let db = client.database("stories_test");
    let collection = format!("{}_{}", test_name, ObjectId::new().to_hex());
    MongoStoryRepository::with_collection(db, &collection)
}

fn input(title: &str) -> CreateStory {
    CreateStory {
        title: title.to_string(),
        body: format!("{} body", title),
    }
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn test_list_returns_newest_first() {
    let repo = repository("list_order").await;
    repo.create(input("first")).await.unwrap();
    repo.create(input("second")).await.unwrap();

    let stories = repo.list().await.unwrap();
    let titles: Vec<_> = stories.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["second", "first"]);
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn test_create_get_update_delete() {
    let repo = repository("crud").await;

    let created = repo.create(input("draft")).await.unwrap();
    assert!(created.created_on.is_some());
    let id = ObjectId::parse_str(&created.id).unwrap();

    let fetched = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    let updated = repo
        .update(
            id,
            UpdateStory {
                title: Some("final".to_string()),
                body: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "final");
    assert_eq!(updated.body, "draft body");

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
    assert!(repo.get_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn test_update_unknown_id_matches_nothing() {
    let repo = repository("update_missing").await;
    let result = repo
        .update(
            ObjectId::new(),
            UpdateStory {
                title: Some("t".to_string()),
                body: None,
            },
        )
        .await
        .unwrap();
    assert!(result.is_none());
}
