//! Server host: the state every exposure is built from
//!
//! A `ServerHost` owns the loaded configuration and the single
//! [`OrderService`] for the shop. Exposures borrow it through an `Arc`.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::service::OrderService;
use crate::core::store::TableStore;

/// Host context shared by all exposures
pub struct ServerHost {
    /// Validated configuration
    pub config: Arc<AppConfig>,

    /// Owner of the order table
    pub service: Arc<OrderService>,
}

impl ServerHost {
    /// Build the host around `store`, using the roster from `config`
    pub fn new(config: AppConfig, store: Arc<dyn TableStore>) -> Self {
        tracing::info!(
            shop = %config.shop_name,
            store = %store.describe(),
            salespersons = config.salespersons.len(),
            "order desk host ready"
        );
        let service = OrderService::new(store, config.roster());
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
        }
    }

    pub fn shop_name(&self) -> &str {
        &self.config.shop_name
    }
}
