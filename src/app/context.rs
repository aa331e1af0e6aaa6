use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpBirthdayFetcher;
use crate::fetcher::BirthdayFetcher;

pub struct AppContext {
    pub config: Arc<Config>,
    pub fetcher: Arc<dyn BirthdayFetcher + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn BirthdayFetcher + Send + Sync> =
            Arc::new(HttpBirthdayFetcher::from_config(&config.api)?);

        Ok(Self {
            config: Arc::new(config),
            fetcher,
        })
    }

    /// Build a context around an arbitrary fetcher, e.g. a canned one in tests.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn BirthdayFetcher + Send + Sync>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    pub fn discard_stale_responses(&self) -> bool {
        self.config.api.discard_stale_responses
    }
}
