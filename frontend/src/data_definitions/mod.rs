pub mod url_param;
pub mod store_state;
pub mod browser_storage;
