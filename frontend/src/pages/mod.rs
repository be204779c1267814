pub mod home_page;
pub mod shop_page;
pub mod vehicle_page;
pub mod cart_page;
pub mod account_page;
pub mod brands_page;
