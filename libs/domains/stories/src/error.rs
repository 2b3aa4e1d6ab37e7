use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

/// Message returned for identifiers that are not valid ObjectIds.
pub const INVALID_ID_MESSAGE: &str = "incorrect story id";

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("Invalid story id: {0}")]
    InvalidId(String),

    #[error("Story not found: {0}")]
    NotFound(ObjectId),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type StoryResult<T> = Result<T, StoryError>;

impl From<StoryError> for AppError {
    fn from(err: StoryError) -> Self {
        match err {
            StoryError::InvalidId(_) => AppError::Forbidden(INVALID_ID_MESSAGE.to_string()),
            StoryError::NotFound(id) => AppError::NotFound(format!("story {} not found", id)),
            StoryError::Validation(msg) => AppError::BadRequest(msg),
            StoryError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for StoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for StoryError {
    fn from(err: mongodb::error::Error) -> Self {
        StoryError::Database(err.to_string())
    }
}
