//! Constants shared by the storefront UI and the backend.

/// Products revealed per "load more" step on the shop page.
pub const PRODUCTS_PER_PAGE: usize = 12;

/// Quiescence interval applied to every free-text filter input.
pub const SEARCH_DEBOUNCE_MS: u64 = 250;

pub const DEFAULT_CURRENCY_PREFIX: &str = "$";

pub const EMPTY_RESULTS_MESSAGE: &str = "No products found matching your criteria.";

/// Flat shipping fee added at checkout.
pub const SHIPPING_FEE: f64 = 5000.0;

/// Largest quantity selectable for a single cart line.
pub const MAX_LINE_QUANTITY: u32 = 20;

pub const CART_STORAGE_KEY: &str = "alsaji_cart";
pub const SESSION_STORAGE_KEY: &str = "alsaji_session";
pub const VEHICLE_STORAGE_KEY: &str = "selectedVehicle";

/// Lifetime of a stored login session.
pub const SESSION_TTL_MS: u64 = 60 * 60 * 1000;
