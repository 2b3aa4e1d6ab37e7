//! ObjectId path parameter extractor.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;

use crate::error::StoryError;

/// Parses the `{id}` path segment as a MongoDB ObjectId.
///
/// Malformed ids are rejected with 403 `incorrect story id`.
///
/// ```ignore
/// async fn get_story(StoryIdPath(id): StoryIdPath) -> String {
///     id.to_hex()
/// }
///
/// let app = Router::new().route("/story/{id}", get(get_story));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StoryIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for StoryIdPath
where
    S: Send + Sync,
{
    type Rejection = StoryError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| StoryError::InvalidId(e.body_text()))?;

        ObjectId::parse_str(&raw)
            .map(StoryIdPath)
            .map_err(|_| StoryError::InvalidId(raw))
    }
}
