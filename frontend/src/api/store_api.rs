//! Client API calls for the store backend.

use common::account::{LoginRequest, SessionInfo};
use common::cart::Cart;
use common::catalog::{CatalogIndex, FacetBucket, Product};
use common::order::{CustomerDetails, OrderConfirmation};
use common::vehicle::VehicleIndex;
use dioxus::prelude::*;

#[server]
pub async fn load_catalog() -> Result<CatalogIndex, ServerFnError> {
    let x = backend::api::catalog::load_catalog_index().await.map(|c| c.as_ref().clone());
    x.map_err(|e| ServerFnError::ServerError { message: format!("{e:#}"), code: 500, details: None })
}

#[server]
pub async fn load_vehicle_index() -> Result<VehicleIndex, ServerFnError> {
    let x = backend::api::catalog::load_vehicle_index().await.map(|v| v.as_ref().clone());
    x.map_err(|e| ServerFnError::ServerError { message: format!("{e:#}"), code: 500, details: None })
}

#[server]
pub async fn currency_prefix() -> Result<String, ServerFnError> {
    Ok(backend::config::get_backend_config().currency_prefix.clone())
}

#[server]
pub async fn add_to_cart(product_id: u64, quantity: u32) -> Result<Product, ServerFnError> {
    let x = backend::api::orders::add_to_cart(product_id, quantity).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn login(request: LoginRequest) -> Result<SessionInfo, ServerFnError> {
    let x = backend::api::account::login(request).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn logout(session: SessionInfo) -> Result<(), ServerFnError> {
    let x = backend::api::account::logout(session).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn place_order(cart: Cart, customer: CustomerDetails, payment: String) -> Result<OrderConfirmation, ServerFnError> {
    let x = backend::api::orders::place_order(cart, customer, payment).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

const FEATURED_PRODUCTS: usize = 8;

/// A few in-stock products for the home page, read through the store backend.
#[server]
pub async fn featured_products() -> Result<Vec<Product>, ServerFnError> {
    let x = backend::api::orders::get_products(common::filter_state::FilterState::new()).await;
    let products = x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })?;
    Ok(products.into_iter().filter(|p| p.in_stock).take(FEATURED_PRODUCTS).collect())
}

#[server]
pub async fn top_categories(limit: usize) -> Result<Vec<FacetBucket>, ServerFnError> {
    let x = backend::api::catalog::load_catalog_index().await;
    let catalog = x.map_err(|e| ServerFnError::ServerError { message: format!("{e:#}"), code: 500, details: None })?;
    let mut categories = catalog.categories.clone();
    categories.sort_by(|a, b| b.count.cmp(&a.count));
    categories.truncate(limit);
    Ok(categories)
}
