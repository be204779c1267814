//! Odoo JSON-RPC access.

pub mod jsonrpc;
mod client;
pub use client::{OdooClient, MAX_AUTH_ATTEMPTS};
mod orders;
mod products;
pub use products::check_live_filters;
