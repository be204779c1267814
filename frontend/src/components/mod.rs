pub mod error_boundary;
pub mod suspend_boundary;
pub mod navbar;
pub mod toasts;
pub mod shop_components;
pub mod cart_components;
pub mod vehicle_selector;
