//! Search API routes

use axum::Router;
use domain_search::handlers;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    handlers::router(state.search.clone())
}
