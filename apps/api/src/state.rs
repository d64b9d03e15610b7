use std::sync::Arc;

use crate::chatbot::Chatbot;
use crate::config::Config;
use crate::storage::PortfolioStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable store. `PgStore` in production, `MemoryStore` in tests.
    pub store: Arc<dyn PortfolioStore>,
    pub chatbot: Chatbot,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn PortfolioStore>, chatbot: Chatbot, config: Config) -> Self {
        Self {
            store,
            chatbot,
            config: Arc::new(config),
        }
    }
}
