//! The storefront's view of Odoo, with a local fallback.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use common::account::SessionInfo;
use common::catalog::{CatalogIndex, Product};
use common::filter_state::FilterState;
use common::order::{OrderConfirmation, OrderRequest};
use common::render::PriceFormat;
use common::store_const::SESSION_TTL_MS;
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::odoo::OdooClient;

#[async_trait]
pub trait StoreBackend: Send + Sync {
    async fn get_products(&self, filters: &FilterState) -> anyhow::Result<Vec<Product>>;
    /// Validate a product for the cart and return its current record.
    async fn add_to_cart(&self, product_id: u64, quantity: u32) -> anyhow::Result<Product>;
    async fn login(&self, email: &str, password: &str) -> anyhow::Result<SessionInfo>;
    async fn logout(&self, session: &SessionInfo) -> anyhow::Result<()>;
    async fn create_order(&self, order: &OrderRequest) -> anyhow::Result<OrderConfirmation>;
}

pub fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

fn check_add_to_cart(product_id: u64, quantity: u32) -> anyhow::Result<()> {
    if product_id == 0 {
        anyhow::bail!("Invalid product ID");
    }
    if quantity == 0 {
        anyhow::bail!("Quantity must be at least 1");
    }
    Ok(())
}

pub struct OdooStoreBackend {
    client: OdooClient,
    money: PriceFormat,
}

impl OdooStoreBackend {
    pub fn new(client: OdooClient, money: PriceFormat) -> Self {
        Self { client, money }
    }
}

#[async_trait]
impl StoreBackend for OdooStoreBackend {
    async fn get_products(&self, filters: &FilterState) -> anyhow::Result<Vec<Product>> {
        self.client.search_products(filters).await
    }

    async fn add_to_cart(&self, product_id: u64, quantity: u32) -> anyhow::Result<Product> {
        check_add_to_cart(product_id, quantity)?;
        self.client
            .read_product(product_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Product not found"))
    }

    async fn login(&self, email: &str, password: &str) -> anyhow::Result<SessionInfo> {
        match self.client.login(email, password).await? {
            Some(uid) => Ok(SessionInfo { uid, username: email.to_string(), expires_at_ms: now_ms() + SESSION_TTL_MS }),
            None => anyhow::bail!("Login failed"),
        }
    }

    async fn logout(&self, session: &SessionInfo) -> anyhow::Result<()> {
        self.client.logout(session.uid).await
    }

    async fn create_order(&self, order: &OrderRequest) -> anyhow::Result<OrderConfirmation> {
        let order_id = self.client.create_sale_order(order, &self.money).await?;
        Ok(OrderConfirmation {
            order_number: order.order_number.clone(),
            odoo_order_id: Some(order_id),
            message: "Order created successfully in Odoo".to_string(),
        })
    }
}

/// Serves everything from the static catalog. Used offline and as fallback.
///
/// Orders are only accepted when an order log is configured; each one is
/// appended to it as a JSON line.
pub struct MockStore {
    catalog: Arc<CatalogIndex>,
    order_log: Option<PathBuf>,
}

impl MockStore {
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        Self { catalog, order_log: None }
    }

    pub fn with_order_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.order_log = Some(path.into());
        self
    }

    async fn append_order(&self, path: &PathBuf, order: &OrderRequest) -> anyhow::Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.with_context(|| format!("creating {}", dir.display()))?;
        }
        let mut line = serde_json::to_string(&json!({ "recorded_at_ms": now_ms(), "order": order }))?;
        line.push('\n');
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("opening order log {}", path.display()))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl StoreBackend for MockStore {
    async fn get_products(&self, filters: &FilterState) -> anyhow::Result<Vec<Product>> {
        Ok(self.catalog.apply_filters(filters).products)
    }

    async fn add_to_cart(&self, product_id: u64, quantity: u32) -> anyhow::Result<Product> {
        check_add_to_cart(product_id, quantity)?;
        self.catalog.product(product_id).cloned().ok_or_else(|| anyhow::anyhow!("Product not found"))
    }

    async fn login(&self, _email: &str, _password: &str) -> anyhow::Result<SessionInfo> {
        anyhow::bail!("Accounts are unavailable in offline mode")
    }

    async fn logout(&self, _session: &SessionInfo) -> anyhow::Result<()> {
        Ok(())
    }

    async fn create_order(&self, order: &OrderRequest) -> anyhow::Result<OrderConfirmation> {
        let Some(path) = &self.order_log else {
            anyhow::bail!("Orders cannot be placed while the store is offline");
        };
        self.append_order(path, order).await?;
        info!("order {} recorded in {}", order.order_number, path.display());
        Ok(OrderConfirmation {
            order_number: order.order_number.clone(),
            odoo_order_id: None,
            message: "Order request recorded".to_string(),
        })
    }
}

/// A primary backend with the mock catalog behind it.
///
/// Catalog reads and cart checks fall back to [`MockStore`] when the primary
/// fails. Login and orders never fall back: a failed order must reach the
/// customer as an error.
pub struct StoreService<B> {
    primary: Option<B>,
    fallback: MockStore,
}

impl<B: StoreBackend> StoreService<B> {
    pub fn new(primary: B, catalog: Arc<CatalogIndex>) -> Self {
        Self { primary: Some(primary), fallback: MockStore::new(catalog) }
    }

    pub fn mock_only(fallback: MockStore) -> Self {
        Self { primary: None, fallback }
    }

    pub fn is_mock_only(&self) -> bool {
        self.primary.is_none()
    }
}

#[async_trait]
impl<B: StoreBackend> StoreBackend for StoreService<B> {
    async fn get_products(&self, filters: &FilterState) -> anyhow::Result<Vec<Product>> {
        if let Some(primary) = &self.primary {
            match primary.get_products(filters).await {
                Ok(products) => return Ok(products),
                Err(e) => warn!("get_products: falling back to static catalog: {e:#}"),
            }
        }
        self.fallback.get_products(filters).await
    }

    async fn add_to_cart(&self, product_id: u64, quantity: u32) -> anyhow::Result<Product> {
        check_add_to_cart(product_id, quantity)?;
        if let Some(primary) = &self.primary {
            match primary.add_to_cart(product_id, quantity).await {
                Ok(product) => return Ok(product),
                Err(e) => warn!("add_to_cart: falling back to static catalog: {e:#}"),
            }
        }
        self.fallback.add_to_cart(product_id, quantity).await
    }

    async fn login(&self, email: &str, password: &str) -> anyhow::Result<SessionInfo> {
        match &self.primary {
            Some(primary) => {
                let session = primary.login(email, password).await?;
                info!("user {} logged in", session.username);
                Ok(session)
            }
            None => self.fallback.login(email, password).await,
        }
    }

    async fn logout(&self, session: &SessionInfo) -> anyhow::Result<()> {
        if let Some(primary) = &self.primary {
            if let Err(e) = primary.logout(session).await {
                warn!("logout: ignoring odoo error: {e:#}");
            }
        }
        Ok(())
    }

    async fn create_order(&self, order: &OrderRequest) -> anyhow::Result<OrderConfirmation> {
        if order.items.is_empty() {
            anyhow::bail!("Cannot place an order with an empty cart");
        }
        match &self.primary {
            Some(primary) => primary.create_order(order).await.map_err(|e| {
                warn!("create_order {}: odoo rejected the order: {e:#}", order.order_number);
                e
            }),
            None => self.fallback.create_order(order).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::cart::Cart;
    use common::catalog::FacetBucket;
    use common::order::CustomerDetails;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn catalog() -> Arc<CatalogIndex> {
        let product = |id: u64, name: &str, brand: &str, price: f64| Product {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            category: "Filtration".to_string(),
            price,
            in_stock: true,
            search_terms: vec![Some(name.to_string())],
            ..Default::default()
        };
        Arc::new(CatalogIndex {
            categories: vec![FacetBucket::new("Filtration", 2)],
            products: vec![product(1, "Oil Filter", "Denso", 9.5), product(2, "Air Filter", "Bosch", 14.0)],
            ..Default::default()
        })
    }

    /// Records calls and fails every one of them.
    #[derive(Default)]
    struct DownBackend {
        calls: AtomicUsize,
    }

    impl DownBackend {
        fn fail<T>(&self) -> anyhow::Result<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("connection refused")
        }
    }

    #[async_trait]
    impl StoreBackend for DownBackend {
        async fn get_products(&self, _: &FilterState) -> anyhow::Result<Vec<Product>> {
            self.fail()
        }
        async fn add_to_cart(&self, _: u64, _: u32) -> anyhow::Result<Product> {
            self.fail()
        }
        async fn login(&self, _: &str, _: &str) -> anyhow::Result<SessionInfo> {
            self.fail()
        }
        async fn logout(&self, _: &SessionInfo) -> anyhow::Result<()> {
            self.fail()
        }
        async fn create_order(&self, _: &OrderRequest) -> anyhow::Result<OrderConfirmation> {
            self.fail()
        }
    }

    fn order() -> OrderRequest {
        let mut cart = Cart::new();
        cart.add(&catalog().products[0], 1).unwrap();
        OrderRequest::from_cart(&cart, CustomerDetails::default(), "cash", 1)
    }

    #[tokio::test]
    async fn product_reads_fall_back_to_the_catalog() {
        let service = StoreService::new(DownBackend::default(), catalog());
        let products = service.get_products(&FilterState::new().with_brand("bosch")).await.unwrap();
        assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);

        let product = service.add_to_cart(1, 2).await.unwrap();
        assert_eq!(product.name, "Oil Filter");
        assert_eq!(service.primary.as_ref().unwrap().calls.load(Ordering::SeqCst), 2);
    }

    /// Answers like a live Odoo read: products carry no brand.
    struct BrandlessBackend;

    #[async_trait]
    impl StoreBackend for BrandlessBackend {
        async fn get_products(&self, filters: &FilterState) -> anyhow::Result<Vec<Product>> {
            crate::odoo::check_live_filters(filters)?;
            let mut products = catalog().products.clone();
            products.iter_mut().for_each(|p| p.brand.clear());
            Ok(common::filter_engine::apply_filters(filters, &products).products)
        }
        async fn add_to_cart(&self, _: u64, _: u32) -> anyhow::Result<Product> {
            anyhow::bail!("unused")
        }
        async fn login(&self, _: &str, _: &str) -> anyhow::Result<SessionInfo> {
            anyhow::bail!("unused")
        }
        async fn logout(&self, _: &SessionInfo) -> anyhow::Result<()> {
            Ok(())
        }
        async fn create_order(&self, _: &OrderRequest) -> anyhow::Result<OrderConfirmation> {
            anyhow::bail!("unused")
        }
    }

    #[tokio::test]
    async fn brand_filters_are_served_from_the_catalog() {
        let service = StoreService::new(BrandlessBackend, catalog());
        let by_brand = service.get_products(&FilterState::new().with_brand("denso")).await.unwrap();
        assert_eq!(by_brand.iter().map(|p| (p.id, p.brand.as_str())).collect::<Vec<_>>(), vec![(1, "Denso")]);

        let live = service.get_products(&FilterState::new().with_category("Filtration")).await.unwrap();
        assert_eq!(live.len(), 2);
        assert!(live.iter().all(|p| p.brand.is_empty()));
    }

    #[tokio::test]
    async fn add_to_cart_rejects_bad_input_before_any_call() {
        let service = StoreService::new(DownBackend::default(), catalog());
        assert!(service.add_to_cart(0, 1).await.is_err());
        assert!(service.add_to_cart(1, 0).await.is_err());
        assert!(service.add_to_cart(99, 1).await.is_err());
        assert_eq!(service.primary.as_ref().unwrap().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn login_does_not_fall_back() {
        let service = StoreService::new(DownBackend::default(), catalog());
        assert!(service.login("a@b.c", "pw").await.is_err());
        assert!(StoreService::<DownBackend>::mock_only(MockStore::new(catalog())).login("a@b.c", "pw").await.is_err());
    }

    #[tokio::test]
    async fn failed_odoo_orders_surface_as_errors() {
        let service = StoreService::new(DownBackend::default(), catalog());
        let err = service.create_order(&order()).await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(service.primary.as_ref().unwrap().calls.load(Ordering::SeqCst), 1);

        let empty = OrderRequest::from_cart(&Cart::new(), CustomerDetails::default(), "cash", 2);
        assert!(service.create_order(&empty).await.is_err());
    }

    #[tokio::test]
    async fn offline_orders_are_appended_to_the_order_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("orders").join("orders.jsonl");
        let service = StoreService::<DownBackend>::mock_only(MockStore::new(catalog()).with_order_log(&log));
        assert!(service.is_mock_only());

        let confirmation = service.create_order(&order()).await.unwrap();
        assert_eq!(confirmation.order_number, "WEB-1");
        assert_eq!(confirmation.odoo_order_id, None);
        service.create_order(&order()).await.unwrap();

        let written = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<serde_json::Value> = written.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["order"]["order_number"], "WEB-1");
        assert_eq!(lines[0]["order"]["items"][0]["product_id"], 1);
    }

    #[tokio::test]
    async fn offline_orders_without_a_log_are_refused() {
        let service = StoreService::<DownBackend>::mock_only(MockStore::new(catalog()));
        assert!(service.create_order(&order()).await.is_err());
    }

    #[tokio::test]
    async fn logout_swallows_backend_errors() {
        let service = StoreService::new(DownBackend::default(), catalog());
        let session = SessionInfo { uid: 2, username: "a".to_string(), expires_at_ms: 0 };
        assert!(service.logout(&session).await.is_ok());
    }
}
