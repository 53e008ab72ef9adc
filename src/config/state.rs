// Application state module
// Holds the loaded configuration and the router built from it

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::types::Config;
use crate::executor;
use crate::routing::Router;

/// Application state shared by every connection
pub struct AppState {
    pub config: Config,
    pub router: Arc<Router>,

    // Cached config values for fast access without locks
    pub cached_access_log: AtomicBool,
}

impl AppState {
    /// Build the router and its command executor from configuration
    pub fn new(config: &Config) -> Self {
        let executor = executor::from_config(&config.command);
        let router = Router::new(config.app.greeting.clone(), executor);

        Self {
            config: config.clone(),
            router: Arc::new(router),
            cached_access_log: AtomicBool::new(config.logging.access_log),
        }
    }
}
