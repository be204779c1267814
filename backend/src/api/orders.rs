use common::cart::Cart;
use common::catalog::Product;
use common::filter_state::FilterState;
use common::order::{CustomerDetails, OrderConfirmation, OrderRequest};
use tracing::info;

use crate::api::get_store;
use crate::api::store_service::{StoreBackend, now_ms};

pub async fn get_products(filters: FilterState) -> anyhow::Result<Vec<Product>> {
    get_store().await?.get_products(&filters).await
}

pub async fn add_to_cart(product_id: u64, quantity: u32) -> anyhow::Result<Product> {
    get_store().await?.add_to_cart(product_id, quantity).await
}

/// Turn the visitor's cart into an order request and submit it.
pub async fn place_order(cart: Cart, customer: CustomerDetails, payment: String) -> anyhow::Result<OrderConfirmation> {
    let order = OrderRequest::from_cart(&cart, customer, payment, now_ms());
    let store = get_store().await?;
    info!(
        "placing order {} with {} lines (offline: {})",
        order.order_number,
        order.items.len(),
        store.is_mock_only()
    );
    store.create_order(&order).await
}
