//! Server functions called by the pages.

pub mod store_api;
