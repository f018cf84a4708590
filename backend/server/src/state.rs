use std::sync::Arc;

use anyhow::Result;

use super::{
    config::Config,
    database::{RedisStore, UserStore, init_redis},
    github::{GithubClient, Upstream},
};

pub struct State {
    pub config: Config,
    pub store: Arc<dyn UserStore>,
    pub github: Arc<dyn Upstream>,
}

impl State {
    pub async fn new() -> Result<Arc<Self>> {
        let config = Config::load()?;

        let redis_connection = init_redis(&config.redis_url).await?;
        let github = GithubClient::new(&config.github_api_url, &config.github_token)?;

        Ok(Self::from_parts(
            config,
            Arc::new(RedisStore::new(redis_connection)),
            Arc::new(github),
        ))
    }

    pub fn from_parts(
        config: Config,
        store: Arc<dyn UserStore>,
        github: Arc<dyn Upstream>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            store,
            github,
        })
    }
}
