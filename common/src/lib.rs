//! Common library exports shared between frontend and backend.
//!
//! Everything in this crate is free of I/O: the catalog model, the filter
//! engine and result renderer that run in the browser, and the small state
//! types (cart, cache entries, debounce tickets) both sides agree on.

extern crate serde;

pub mod lenient;

pub mod store_const;
pub mod slug;
pub mod catalog;
pub mod filter_state;
pub mod filter_engine;
pub mod render;
pub mod facets;
pub mod vehicle;
pub mod cart;
pub mod order;
pub mod account;
pub mod cache;
pub mod debounce;
