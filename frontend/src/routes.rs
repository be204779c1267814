use dioxus::prelude::*;

use common::filter_state::FilterState;

use crate::components::navbar::Navbar;
use crate::data_definitions::url_param::UrlParam;
use crate::pages::account_page::AccountPage;
use crate::pages::brands_page::BrandsPage;
use crate::pages::cart_page::CartPage;
use crate::pages::home_page::HomePage;
use crate::pages::shop_page::ShopPage;
use crate::pages::vehicle_page::VehiclePage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]

    #[route("/")]
    HomePage {},

    #[route("/shop/:filters")]
    ShopPage { filters: UrlParam<FilterState> },

    #[route("/brands")]
    BrandsPage {},

    #[route("/vehicles")]
    VehiclePage {},

    #[route("/cart")]
    CartPage {},

    #[route("/account")]
    AccountPage {},
}

impl Route {
    pub fn shop_page(filters: FilterState) -> Self {
        Self::ShopPage { filters: UrlParam::from(filters) }
    }
}
