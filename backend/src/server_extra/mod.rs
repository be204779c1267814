//! Plain axum routes served next to the Dioxus app.

mod odoo_proxy;
pub use odoo_proxy::{odoo_proxy, PROXY_ROUTE};
