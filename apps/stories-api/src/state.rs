//! Shared application state passed to the route builders.

use domain_search::SearchService;
use mongodb::{Client, Database};

/// Cloned per router; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// MongoDB client (shares the underlying connection pool)
    pub mongo_client: Client,
    pub db: Database,
    pub search: SearchService,
}
