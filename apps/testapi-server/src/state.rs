//! Shared application state handed to every handler.

use std::sync::Arc;

use testapi_store::{ProductRepository, Store};

use crate::config::ServerConfig;
use crate::services::BasketService;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Store, config: ServerConfig) -> Self {
        AppState {
            store,
            config: Arc::new(config),
        }
    }

    /// Basket rules backed by this state's baskets and product catalog.
    pub fn basket_service(&self) -> BasketService<ProductRepository> {
        BasketService::new(
            self.store.baskets().clone(),
            self.store.products().clone(),
        )
    }
}

#[cfg(test)]
impl AppState {
    /// Small, freshly seeded state for router tests.
    pub fn for_tests() -> Self {
        let config = ServerConfig {
            product_seed_count: 10,
            user_seed_count: 10,
            ..ServerConfig::default()
        };
        AppState::new(Store::new(config.store_config()), config)
    }
}
