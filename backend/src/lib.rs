//! Server side of the storefront: Odoo access, the store service behind the
//! server functions, the catalog exporter and the JSON-RPC proxy route.

pub mod config;
pub mod odoo;
pub mod api;
pub mod export;
pub mod server_extra;
