use std::sync::Arc;

use tokio::sync::RwLock;

use super::config::Config;
use super::store::{ClickStore, RateLimitPolicy};

pub struct AppState {
    pub config: Config,
    pub store: RwLock<ClickStore>,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        let config = Config::load();

        let store = ClickStore::new(RateLimitPolicy {
            threshold: config.rate_limit_clicks,
            window_ms: config.rate_limit_window_ms,
        });

        Arc::new(Self {
            config,
            store: RwLock::new(store),
        })
    }
}
