//! The shop page widgets and the context they share.

pub mod filter_sidebar;
pub mod product_card;
pub mod product_results;
pub mod search_bar;

use common::catalog::CatalogIndex;
use common::facets::FacetCountMode;
use common::filter_state::FilterState;
use common::render::PriceFormat;
use common::store_const::PRODUCTS_PER_PAGE;
use dioxus::prelude::*;

use crate::routes::Route;

/// Everything the shop widgets read. Filters are only changed through
/// [`ShopContext::update_filters`] so the URL always mirrors them.
#[derive(Clone, Copy)]
pub struct ShopContext {
    pub catalog: Signal<CatalogIndex>,
    pub money: Signal<PriceFormat>,
    pub filters: Signal<FilterState>,
    pub count_mode: Signal<FacetCountMode>,
    pub visible: Signal<usize>,
}

impl ShopContext {
    pub fn update_filters(mut self, change: impl FnOnce(&mut FilterState)) {
        let mut next = self.filters.peek().clone();
        change(&mut next);
        if next == *self.filters.peek() {
            return;
        }
        self.visible.set(PRODUCTS_PER_PAGE);
        navigator().replace(Route::shop_page(next.clone()));
        self.filters.set(next);
    }
}

pub fn use_shop() -> ShopContext {
    use_context::<ShopContext>()
}
