//! Entry points behind the frontend's server functions.

pub mod store_service;
pub mod catalog;
pub mod account;
pub mod orders;

use std::sync::Arc;

use common::render::PriceFormat;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::config::get_backend_config;
use crate::odoo::OdooClient;
use store_service::{MockStore, OdooStoreBackend, StoreService};

pub type SharedStore = StoreService<OdooStoreBackend>;

/// Process-wide store service, built on first use.
pub async fn get_store() -> anyhow::Result<&'static SharedStore> {
    static STORE: OnceCell<SharedStore> = OnceCell::const_new();
    STORE
        .get_or_try_init(|| async {
            let config = get_backend_config();
            let catalog = catalog::load_catalog_index().await.unwrap_or_else(|e| {
                warn!("static catalog unavailable, mock fallback is empty: {e:#}");
                Arc::default()
            });
            if config.use_mock_data || !config.has_odoo_credentials() {
                info!("store service running on the static catalog only");
                return Ok(StoreService::mock_only(MockStore::new(catalog).with_order_log(&config.orders_path)));
            }
            let client = OdooClient::from_config(config)?;
            let backend = OdooStoreBackend::new(client, PriceFormat::with_prefix(config.currency_prefix.clone()));
            Ok::<_, anyhow::Error>(StoreService::new(backend, catalog))
        })
        .await
}
