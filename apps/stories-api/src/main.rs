use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_search::{
    EmbeddingProvider, OpenAIProvider, PineconeIndex, SearchService, SimilarityIndex,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);
    observability::init_metrics()?;

    // Connect to MongoDB with retry
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(&config.mongodb.database);

    info!(
        database = %config.mongodb.database,
        collection = %config.stories_collection,
        "Connected to MongoDB"
    );

    let embedder = OpenAIProvider::new(config.openai.clone())?;
    let index = PineconeIndex::connect(config.pinecone.clone()).await?;
    info!(
        embedder = embedder.name(),
        index = index.name(),
        model = %config.search.model,
        namespace = %config.search.namespace,
        "Search providers ready"
    );
    let search = SearchService::new(Arc::new(embedder), Arc::new(index), config.search.clone());

    let state = AppState {
        config,
        mongo_client,
        db,
        search,
    };

    let app = api::app(&state, &api::router_options(&state))?;

    let server_config = state.config.server.clone();
    let mongo_client = state.mongo_client.clone();

    info!("Starting stories API on {}", server_config.address());

    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: closing MongoDB connections");
        mongo_client.shutdown().await;
        info!("MongoDB connection closed successfully");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Stories API shutdown complete");
    Ok(())
}
