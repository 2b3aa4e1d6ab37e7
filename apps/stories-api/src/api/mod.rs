//! HTTP surface of the stories API.

pub mod health;
pub mod search;
pub mod stories;

use axum::{Router, middleware};
use axum_helpers::{RouterOptions, create_router, health_router};
use observability::metrics_middleware;
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes nested under the API prefix by [`create_router`].
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(stories::router(state))
        .merge(search::router(state))
        .layer(middleware::from_fn(metrics_middleware))
}

/// Router options derived from the app configuration.
pub fn router_options(state: &AppState) -> RouterOptions {
    RouterOptions {
        static_root: Some(state.config.static_dir.clone()),
        static_mounts: vec![("/static".to_string(), state.config.static_assets_dir.clone())],
        ..RouterOptions::default()
    }
}

/// Complete application: docs, API, static hosting, health, readiness, metrics.
pub fn app(state: &AppState, options: &RouterOptions) -> io::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state), options)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone())))
}
