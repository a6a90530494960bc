use std::sync::Arc;
use std::time::Duration;

use crate::api::{HttpApi, NewsApi};
use crate::app::Result;
use crate::config::Config;
use crate::store::{CommentStore, NewsStore};

/// Wires the API client and the two stores together. Owned by the
/// application root and passed by reference to whatever drives the views;
/// there are no ambient singletons.
pub struct AppContext {
    pub config: Config,
    pub api: Arc<dyn NewsApi + Send + Sync>,
    pub news: NewsStore,
    pub comments: CommentStore,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let api: Arc<dyn NewsApi + Send + Sync> = Arc::new(HttpApi::new(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
        )?);

        Self::with_api(config, api)
    }

    /// Build a context around an arbitrary [`NewsApi`], used by tests to
    /// swap the HTTP client for an in-memory fake.
    pub fn with_api(config: Config, api: Arc<dyn NewsApi + Send + Sync>) -> Result<Self> {
        let news = NewsStore::new(api.clone());

        let comments = match config.local_comment_path()? {
            Some(path) => CommentStore::with_cache(api.clone(), path),
            None => CommentStore::new(api.clone()),
        };

        Ok(Self {
            config,
            api,
            news,
            comments,
        })
    }
}
