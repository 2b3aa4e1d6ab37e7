use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_search::{OpenAIConfig, PineconeConfig, SearchSettings};
use domain_stories::mongodb::DEFAULT_COLLECTION;
use std::path::PathBuf;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    /// Collection holding the stories (`STORIES_COLLECTION`, default `posts`)
    pub stories_collection: String,
    pub openai: OpenAIConfig,
    pub pinecone: PineconeConfig,
    pub search: SearchSettings,
    /// Built web client served at `/` (`STATIC_DIR`)
    pub static_dir: PathBuf,
    /// Plain assets served at `/static` (`STATIC_ASSETS_DIR`)
    pub static_assets_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let app = app_info!();
        let mongodb = MongoConfig::from_env()?.with_app_name(app.name);

        Ok(Self {
            app,
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            mongodb,
            stories_collection: env_or_default("STORIES_COLLECTION", DEFAULT_COLLECTION),
            openai: OpenAIConfig::from_env()?,
            pinecone: PineconeConfig::from_env()?,
            search: SearchSettings::from_env()?,
            static_dir: env_or_default("STATIC_DIR", "./web/build").into(),
            static_assets_dir: env_or_default("STATIC_ASSETS_DIR", "./static").into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [(&str, Option<&str>); 5] = [
        ("MONGODB_URL", Some("mongodb://localhost:27017")),
        ("MONGODB_DATABASE", Some("socialstories")),
        ("OPENAI_API_KEY", Some("sk-test")),
        ("PINECONE_API_KEY", Some("pc-test")),
        ("PINECONE_INDEX_NAME", Some("stories")),
    ];

    #[test]
    fn test_config_defaults() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("STORIES_COLLECTION", None),
            ("STATIC_DIR", None),
            ("PORT", None),
            ("SEARCH_TOP_K", None),
        ]);

        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.stories_collection, "posts");
            assert_eq!(config.static_dir, PathBuf::from("./web/build"));
            assert_eq!(config.server.port, 5001);
            assert_eq!(config.search.top_k, 20);
            assert_eq!(config.mongodb.app_name.as_deref(), Some("stories_api"));
        });
    }

    #[test]
    fn test_missing_provider_key_fails() {
        let vars: Vec<_> = REQUIRED
            .iter()
            .map(|&(key, value)| (key, if key == "OPENAI_API_KEY" { None } else { value }))
            .collect();

        temp_env::with_vars(vars, || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("OPENAI_API_KEY"));
        });
    }
}
